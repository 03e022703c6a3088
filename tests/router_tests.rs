mod common;

use common::fixtures::zoo_registry;
use waypoint::{RouteMatch, RouteRegistry, Verb};

fn assert_route_match(routes: &RouteRegistry, method: &str, path: &str, expected: &str) {
    match routes.match_route(method, path, "") {
        Some(RouteMatch {
            controller, action, ..
        }) => {
            let handler = format!("{controller}@{action}");
            println!("✅ {} {} → {}", method, path, handler);
            assert_eq!(
                handler, expected,
                "Handler mismatch for {} {}: expected '{}', got '{}'",
                method, path, expected, handler
            );
        }
        None => {
            println!("❌ {} {} → no match", method, path);
            assert_eq!(
                expected, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

#[test]
fn test_router_root_path() {
    assert_route_match(&zoo_registry(), "GET", "/", "Home@index");
}

#[test]
fn test_router_verbs_on_same_uri() {
    let routes = zoo_registry();
    assert_route_match(&routes, "GET", "/zoo/animals", "Animals@index");
    assert_route_match(&routes, "POST", "/zoo/animals", "Animals@store");
    assert_route_match(&routes, "GET", "/zoo/animals/123", "Animals@show");
    assert_route_match(&routes, "PUT", "/zoo/animals/123", "Animals@update");
    assert_route_match(&routes, "PATCH", "/zoo/animals/123", "Animals@patch");
    assert_route_match(&routes, "DELETE", "/zoo/animals/123", "Animals@destroy");
    assert_route_match(&routes, "OPTIONS", "/zoo/health", "Health@options");
}

#[test]
fn test_router_unknown_path() {
    assert_route_match(&zoo_registry(), "GET", "/unknown", "<none>");
}

#[test]
fn test_router_unsupported_or_unregistered_verb() {
    let routes = zoo_registry();
    assert_route_match(&routes, "DELETE", "/zoo/animals", "<none>");
    assert_route_match(&routes, "HEAD", "/zoo/health", "<none>");
    assert_route_match(&routes, "TRACE", "/zoo/health", "<none>");
    // Method strings are expected uppercase
    assert_route_match(&routes, "get", "/zoo/animals", "<none>");
}

#[test]
fn test_no_match_on_verb_without_routes() {
    let mut routes = RouteRegistry::new();
    routes.get("/users", "Users", "index").unwrap();
    routes.post("/users", "Users", "store").unwrap();
    assert!(routes.match_route("DELETE", "/users", "").is_none());
}

#[test]
fn test_first_registered_route_wins() {
    let routes = zoo_registry();
    assert_route_match(&routes, "GET", "/zoo/animals/new", "Animals@create");
}

#[test]
fn test_parametric_route_registered_first_shadows_literal() {
    let mut routes = RouteRegistry::new();
    routes.get("/users/:id", "Users", "show").unwrap();
    routes.get("/users/new", "Users", "create").unwrap();
    assert_route_match(&routes, "GET", "/users/new", "Users@show");
}

#[test]
fn test_same_verb_and_uri_last_registration_wins() {
    let mut routes = RouteRegistry::new();
    routes.get("/users", "Users", "index").unwrap();
    routes.get("/users/:id", "Users", "show").unwrap();
    routes.get("/users", "People", "list").unwrap();

    assert_eq!(routes.len(), 2);
    assert_route_match(&routes, "GET", "/users", "People@list");
    // The replacement keeps the original position in matching order
    let uris: Vec<&str> = routes.routes(Verb::Get).map(|r| r.uri()).collect();
    assert_eq!(uris, vec!["/users", "/users/:id"]);
}

#[test]
fn test_same_uri_on_different_hosts_are_distinct_routes() {
    let mut routes = RouteRegistry::new();
    routes.get("/x", "A", "a").unwrap().host("a.com");
    routes.get("/x", "B", "b").unwrap().host("b.com");

    assert_eq!(routes.len(), 2);
    assert_eq!(routes.match_route("GET", "/x", "a.com").unwrap().controller, "A");
    assert_eq!(routes.match_route("GET", "/x", "b.com").unwrap().controller, "B");
    assert!(routes.match_route("GET", "/x", "c.com").is_none());
}

#[test]
fn test_plain_route_does_not_replace_host_scoped_route() {
    let mut routes = RouteRegistry::new();
    routes
        .get("/status", "Api", "status")
        .unwrap()
        .host("api.example.com");
    routes.get("/status", "Pages", "status").unwrap();

    assert_eq!(routes.len(), 2);
    assert_route_match(&routes, "GET", "/status", "Pages@status");
    let m = routes
        .match_route("GET", "/status", "api.example.com")
        .unwrap();
    assert_eq!(m.controller, "Api");
}

#[test]
fn test_host_change_after_redefinition_keeps_earlier_route() {
    let mut routes = RouteRegistry::new();
    routes.get("/x", "Plain", "index").unwrap();
    // Same path, but the final template is host-scoped: nothing is replaced
    routes.get("/x", "Scoped", "index").unwrap().host("a.com");

    assert_eq!(routes.len(), 2);
    assert_route_match(&routes, "GET", "/x", "Plain@index");
    let uris: Vec<&str> = routes.routes(Verb::Get).map(|r| r.uri()).collect();
    assert_eq!(uris, vec!["/x", "a.com/x"]);
}

#[test]
fn test_matching_is_exact_on_path() {
    let routes = zoo_registry();
    assert_route_match(&routes, "GET", "/ZOO/animals", "<none>");
    assert_route_match(&routes, "GET", "/zoo/animals/", "<none>");
    assert_route_match(&routes, "GET", "/zoo/animals/a%20b", "Animals@show");
    let m = routes.match_route("GET", "/zoo/animals/a%20b", "").unwrap();
    assert_eq!(m.param("id"), Some("a%20b"));
}

#[test]
fn test_optional_trailing_segment_in_group() {
    let routes = zoo_registry();
    let m = routes
        .match_route("GET", "/keepers/sam/shifts/monday", "")
        .unwrap();
    assert_eq!(m.filters, vec!["auth"]);
    assert_eq!(m.param("keeper"), Some("sam"));
    assert_eq!(m.param("day"), Some("monday"));

    let m = routes.match_route("GET", "/keepers/sam/shifts", "").unwrap();
    assert_eq!(m.param("day"), None);
    assert_eq!(m.params.len(), 1);
}

#[test]
fn test_get_by_name() {
    let routes = zoo_registry();
    let route = routes.get_by_name("animals.show").unwrap();
    assert_eq!(route.uri(), "/zoo/animals/:id");
    assert_eq!(route.action(), "show");
    assert!(routes.get_by_name("animals.missing").is_none());
}
