//! Registry-wide behaviour: scoping, naming, optional segments, overrides
//! and host-scoped routing.

use waypoint::registry::Scope;
use waypoint::runtime_config::RouterConfig;
use waypoint::{GroupOptions, RequestParts, RouteError, RouteRegistry};

#[test]
fn test_matching_is_deterministic() {
    let build = || {
        let mut routes = RouteRegistry::new();
        routes.get("/posts/:slug", "Posts", "show").unwrap();
        routes.get("/posts/:slug/comments/:page?", "Comments", "index").unwrap();
        routes
    };
    let a = build();
    let b = build();

    for path in ["/posts/hello", "/posts/hello/comments", "/posts/hello/comments/2", "/nope"] {
        let first = a.match_route("GET", path, "");
        assert_eq!(first, a.match_route("GET", path, ""));
        assert_eq!(first, b.match_route("GET", path, ""));
    }
}

#[test]
fn test_optional_segment() {
    let mut routes = RouteRegistry::new();
    routes.post("/users/:id/role/:role?", "Roles", "update").unwrap();

    let m = routes.match_route("POST", "/users/23/role", "").unwrap();
    assert_eq!(m.param("id"), Some("23"));
    assert_eq!(m.param("role"), None);

    let m = routes.match_route("POST", "/users/23/role/admin", "").unwrap();
    assert_eq!(m.param("role"), Some("admin"));
    assert_eq!(
        m.params_map().into_iter().collect::<Vec<_>>(),
        vec![
            ("id".to_string(), "23".to_string()),
            ("role".to_string(), "admin".to_string())
        ]
    );

    assert!(routes.match_route("POST", "/users/23", "").is_none());
}

#[test]
fn test_group_prefix_joining() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().prefix("/admin/"), |r| {
            let route = r.get("/users", "AdminUsers", "index")?;
            assert_eq!(route.uri(), "/admin/users");
            Ok(())
        })
        .unwrap();
    assert!(routes.match_route("GET", "/admin/users", "").is_some());
    assert!(routes.match_route("GET", "/admin//users", "").is_none());
}

#[test]
fn test_nested_prefixes_concatenate() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().prefix("/api"), |r| {
            r.group(GroupOptions::new().prefix("/v1"), |r| {
                r.get("/status", "Status", "show")?;
                Ok(())
            })
        })
        .unwrap();
    let m = routes.match_route("GET", "/api/v1/status", "").unwrap();
    assert_eq!(m.uri, "/api/v1/status");
}

#[test]
fn test_filter_accumulation_drops_duplicates() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().filter("auth"), |r| {
            r.group(GroupOptions::new().filter("auth"), |r| {
                r.group(GroupOptions::new().filter(["auth", "admin"]), |r| {
                    r.get("/panel", "Panel", "index")?.filter("admin");
                    Ok(())
                })
            })
        })
        .unwrap();
    let m = routes.match_route("GET", "/panel", "").unwrap();
    assert_eq!(m.filters, vec!["auth", "admin"]);
}

#[test]
fn test_scope_restored_after_group() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().prefix("/admin").filter("auth"), |r| {
            r.get("/inside", "Inside", "index")?;
            Ok(())
        })
        .unwrap();
    routes.get("/outside", "Outside", "index").unwrap();

    assert_eq!(routes.current_scope(), Scope::default());
    let m = routes.match_route("GET", "/outside", "").unwrap();
    assert!(m.filters.is_empty());
}

#[test]
fn test_scope_restored_after_failed_group() {
    let mut routes = RouteRegistry::new();
    let err = routes
        .group(GroupOptions::new().filter("auth"), |r| {
            r.get("/ok", "Ok", "index")?;
            r.get("  ", "Broken", "index")?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, RouteError::EmptyRouteDefinition { .. }));

    routes.get("/after", "After", "index").unwrap();
    let m = routes.match_route("GET", "/after", "").unwrap();
    assert!(m.filters.is_empty());
    // Routes registered before the failure stay registered
    assert!(routes.match_route("GET", "/ok", "").is_some());
}

#[test]
fn test_duplicate_name_rejected_at_boot() {
    let mut routes = RouteRegistry::new();
    routes.get("/a", "A", "index").unwrap().name("dup");
    routes.get("/b", "B", "index").unwrap().name("dup");

    match routes.boot_names() {
        Err(RouteError::DuplicateRouteName { name, first, second }) => {
            assert_eq!(name, "dup");
            assert_eq!(first, "GET /a");
            assert_eq!(second, "GET /b");
        }
        other => panic!("expected duplicate name error, got {other:?}"),
    }
}

#[test]
fn test_map_shares_one_name() {
    let mut routes = RouteRegistry::new();
    routes
        .map(["GET", "post"], "/session", "Session", "handle")
        .unwrap()
        .name("session");
    routes.boot_names().unwrap();
    assert_eq!(routes.get_by_name("session").unwrap().uri(), "/session");
    assert!(routes.match_route("POST", "/session", "").is_some());
}

#[test]
fn test_map_with_unsupported_verb_registers_nothing() {
    let mut routes = RouteRegistry::new();
    let err = routes
        .map(["GET", "CONNECT"], "/tunnel", "Tunnel", "open")
        .err()
        .unwrap();
    assert_eq!(
        err,
        RouteError::UnsupportedHttpMethod {
            method: "CONNECT".into()
        }
    );
    assert!(routes.is_empty());
}

#[test]
fn test_numeric_placeholder_override() {
    let mut routes = RouteRegistry::new();
    routes
        .get("/users/:id", "Users", "show")
        .unwrap()
        .pattern([("id", ":num")]);
    routes.get("/users/:name", "Users", "byName").unwrap();

    assert_eq!(routes.match_route("GET", "/users/42", "").unwrap().action, "show");
    let m = routes.match_route("GET", "/users/abc", "").unwrap();
    assert_eq!(m.action, "byName");
    assert_eq!(m.param("name"), Some("abc"));
}

#[test]
fn test_literal_regex_override_is_anchored() {
    let mut routes = RouteRegistry::new();
    routes
        .get("/blobs/:hash", "Blobs", "show")
        .unwrap()
        .pattern([("hash", "[a-f0-9]{4}")]);
    assert!(routes.match_route("GET", "/blobs/beef", "").is_some());
    assert!(routes.match_route("GET", "/blobs/beefy", "").is_none());
}

#[test]
fn test_any_placeholder_spans_segments() {
    let mut routes = RouteRegistry::new();
    routes
        .get("/files/:path", "Files", "show")
        .unwrap()
        .pattern([("path", ":any")]);
    let m = routes.match_route("GET", "/files/a/b/c.txt", "").unwrap();
    assert_eq!(m.param("path"), Some("a/b/c.txt"));
}

#[test]
fn test_wildcard_subdomain_captures_tenant() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().host(":tenant.example.com"), |r| {
            r.get("/dashboard", "Dashboard", "index")?;
            r.get("/projects/:id", "Projects", "show")?;
            Ok(())
        })
        .unwrap();

    let m = routes
        .match_route("GET", "/dashboard", "acme.example.com")
        .unwrap();
    assert_eq!(m.uri, ":tenant.example.com/dashboard");
    assert_eq!(m.params.len(), 1);
    assert_eq!(m.param("tenant"), Some("acme"));

    let m = routes
        .match_route("GET", "/projects/7", "acme.example.com")
        .unwrap();
    assert_eq!(m.param("tenant"), Some("acme"));
    assert_eq!(m.param("id"), Some("7"));
}

#[test]
fn test_static_host_only_matches_that_host() {
    let mut routes = RouteRegistry::new();
    routes
        .get("/status", "Status", "show")
        .unwrap()
        .host("api.example.com");

    assert!(routes.match_route("GET", "/status", "api.example.com").is_some());
    // Dots are literal
    assert!(routes.match_route("GET", "/status", "apixexample.com").is_none());
    assert!(routes.match_route("GET", "/status", "").is_none());
}

#[test]
fn test_match_request_from_http_request() {
    let mut routes = RouteRegistry::new();
    routes
        .group(GroupOptions::new().host(":tenant.example.com"), |r| {
            r.get("/", "Home", "index")?;
            Ok(())
        })
        .unwrap();

    let req = http::Request::builder()
        .method("GET")
        .uri("/")
        .header("host", "acme.example.com:8080")
        .body(())
        .unwrap();
    let m = routes.match_request(&RequestParts::from_http(&req)).unwrap();
    assert_eq!(m.param("tenant"), Some("acme"));
}

#[test]
fn test_uncached_registry_matches_identically() {
    let config = RouterConfig {
        cache_patterns: false,
        ..RouterConfig::default()
    };
    let mut cached = RouteRegistry::new();
    let mut uncached = RouteRegistry::with_config(config);
    for routes in [&mut cached, &mut uncached] {
        routes.get("/a/:x/:y?", "A", "index").unwrap();
    }
    for path in ["/a/1", "/a/1/2", "/a"] {
        assert_eq!(
            cached.match_route("GET", path, ""),
            uncached.match_route("GET", path, "")
        );
    }
}
