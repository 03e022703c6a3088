use super::scope::{join_uri, GroupOptions, Scope, ScopeGuard};
use crate::error::RouteError;
use crate::placeholder::PatternOverride;
use crate::route::{IntoFilters, Route, Verb};
use crate::runtime_config::RouterConfig;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use tracing::{debug, info, warn};

/// Action used when boot code does not name one
pub const DEFAULT_ACTION: &str = "index";

/// Per-verb route table keyed by effective uri, in registration order
pub(crate) type VerbTable = IndexMap<String, Route>;

/// Owns every registered route, the group scope stack and the name index
///
/// Registration happens once, single-threaded, at boot. After that the
/// registry is only read: [`match_route`](RouteRegistry::match_route)
/// takes `&self` and returns a fresh [`RouteMatch`](super::RouteMatch), so
/// one registry can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    pub(crate) routes: HashMap<Verb, VerbTable>,
    /// name -> (verb, table key); the key is the route's effective uri
    pub(crate) names: HashMap<String, (Verb, String)>,
    pub(crate) scopes: Vec<Scope>,
    next_origin: u64,
    pub(crate) config: RouterConfig,
}

/// Serializable one-line view of a route, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub verb: Verb,
    pub uri: String,
    pub name: Option<String>,
    pub controller: String,
    pub action: String,
    pub filters: Vec<String>,
    pub host: Option<String>,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            verb: route.verb(),
            uri: route.uri().to_string(),
            name: route.route_name().map(str::to_string),
            controller: route.controller().to_string(),
            action: route.action().to_string(),
            filters: route.filters().to_vec(),
            host: route.host_template().map(str::to_string),
        }
    }
}

impl RouteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Scope currently in effect (the root scope outside any group)
    #[must_use]
    pub fn current_scope(&self) -> Scope {
        self.scopes.last().cloned().unwrap_or_default()
    }

    pub fn get(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Get, uri, controller, action)
    }

    pub fn post(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Post, uri, controller, action)
    }

    pub fn put(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Put, uri, controller, action)
    }

    pub fn patch(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Patch, uri, controller, action)
    }

    pub fn delete(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Delete, uri, controller, action)
    }

    pub fn options(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        self.add(Verb::Options, uri, controller, action)
    }

    /// Register one route under the current scope.
    ///
    /// The uri is joined onto the scope prefix and the scope's filters and
    /// host are applied. The returned [`PendingRoute`] accepts further
    /// builder calls; the route enters its verb table, keyed by its final
    /// effective uri, when the handle is dropped. An existing route with the
    /// same verb and effective uri is replaced in place (it keeps its
    /// position in matching order).
    pub fn add(
        &mut self,
        verb: Verb,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<PendingRoute<'_>, RouteError> {
        let origin = self.next_origin();
        let route = self.stage(verb, uri, controller, action, origin)?;
        Ok(PendingRoute {
            registry: self,
            route,
        })
    }

    fn next_origin(&mut self) -> u64 {
        self.next_origin += 1;
        self.next_origin
    }

    fn stage(
        &self,
        verb: Verb,
        uri: &str,
        controller: &str,
        action: &str,
        origin: u64,
    ) -> Result<Route, RouteError> {
        let scope = self.current_scope();
        let raw = format!("{}{}", scope.prefix, uri);
        if raw.trim().is_empty() {
            return Err(RouteError::EmptyRouteDefinition {
                verb: verb.to_string(),
                uri: raw,
            });
        }

        let mut route = Route::new(verb, join_uri(&scope.prefix, uri), controller, action);
        route.set_origin(origin).filter(scope.filters);
        if let Some(host) = scope.host {
            route.host(host);
        }
        Ok(route)
    }

    /// Store a finished route under its verb and effective uri.
    fn commit(&mut self, route: Route) {
        let verb = route.verb();
        let key = route.uri().to_string();

        debug!(
            verb = %verb,
            uri = %key,
            controller = %route.controller(),
            action = %route.action(),
            "Route registered"
        );

        let table = self.routes.entry(verb).or_default();
        match table.entry(key) {
            Entry::Occupied(mut slot) => {
                warn!(
                    verb = %verb,
                    uri = %slot.key(),
                    previous_controller = %slot.get().controller(),
                    previous_action = %slot.get().action(),
                    "Route redefined; last registration wins"
                );
                slot.insert(route);
            }
            Entry::Vacant(slot) => {
                slot.insert(route);
            }
        }
    }

    /// Register the same endpoint for several verbs.
    ///
    /// Every verb is validated before anything is registered, so an
    /// unsupported verb leaves the registry untouched.
    pub fn map<I, S>(
        &mut self,
        verbs: I,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<RouteSet<'_>, RouteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let verbs = verbs
            .into_iter()
            .map(|v| v.as_ref().parse::<Verb>())
            .collect::<Result<Vec<_>, _>>()?;
        self.register_all(&verbs, uri, controller, action)
    }

    /// Register the endpoint for all six verbs.
    pub fn any(
        &mut self,
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<RouteSet<'_>, RouteError> {
        self.register_all(&Verb::ALL, uri, controller, action)
    }

    fn register_all(
        &mut self,
        verbs: &[Verb],
        uri: &str,
        controller: &str,
        action: &str,
    ) -> Result<RouteSet<'_>, RouteError> {
        let origin = self.next_origin();
        let routes = verbs
            .iter()
            .map(|&verb| self.stage(verb, uri, controller, action, origin))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteSet {
            registry: self,
            routes,
        })
    }

    /// Declare routes inside a nested scope.
    ///
    /// The new scope is the current one merged with `options`: prefixes
    /// concatenate, filters union (enclosing filters first), and the host is
    /// inherited unless `options` sets one. The previous scope is restored
    /// when the callback returns, fails or panics.
    ///
    /// ```rust
    /// use waypoint::registry::{GroupOptions, RouteRegistry};
    ///
    /// let mut routes = RouteRegistry::new();
    /// routes.group(GroupOptions::new().prefix("/admin").filter("auth"), |r| {
    ///     r.get("/users/:id", "AdminUsers", "show")?;
    ///     Ok(())
    /// })?;
    /// assert!(routes.match_route("GET", "/admin/users/7", "").is_some());
    /// # Ok::<(), waypoint::RouteError>(())
    /// ```
    pub fn group<F>(&mut self, options: GroupOptions, callback: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut RouteRegistry) -> Result<(), RouteError>,
    {
        let scope = self.current_scope().merge(&options);
        let mut guard = ScopeGuard::push(self, scope);
        callback(&mut guard)
    }

    /// Build the name index from the current routes.
    ///
    /// Run once after all routes are declared. Fails on the first name
    /// claimed by two distinct registrations. Routes registered by a single
    /// `map`/`any` call share their name without conflict.
    pub fn boot_names(&mut self) -> Result<(), RouteError> {
        let mut names: HashMap<String, (Verb, String)> = HashMap::new();
        let mut origins: HashMap<String, u64> = HashMap::new();

        for route in self.iter() {
            let Some(name) = route.route_name() else {
                continue;
            };
            match origins.get(name) {
                Some(&origin) if origin == route.origin() => {}
                Some(_) => {
                    let first = names
                        .get(name)
                        .map(|(verb, uri)| format!("{verb} {uri}"))
                        .unwrap_or_default();
                    return Err(RouteError::DuplicateRouteName {
                        name: name.to_string(),
                        first,
                        second: route.describe(),
                    });
                }
                None => {
                    origins.insert(name.to_string(), route.origin());
                    names.insert(name.to_string(), (route.verb(), route.uri().to_string()));
                }
            }
        }

        info!(
            routes_count = self.len(),
            named_count = names.len(),
            "Route names booted"
        );
        self.names = names;
        Ok(())
    }

    /// Look up a route by name. Only sees names indexed by the last
    /// successful [`boot_names`](Self::boot_names).
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Route> {
        let (verb, key) = self.names.get(name)?;
        self.routes
            .get(verb)
            .and_then(|table| table.get(key))
            .filter(|route| route.route_name() == Some(name))
    }

    /// Compile every route and report the first invalid pattern.
    pub fn validate(&self) -> Result<(), RouteError> {
        for route in self.iter() {
            route.compiled(self.config.cache_patterns, self.config.regex_size_limit)?;
        }
        Ok(())
    }

    /// Routes for one verb in registration (= matching) order
    pub fn routes(&self, verb: Verb) -> impl Iterator<Item = &Route> {
        self.routes.get(&verb).into_iter().flat_map(|t| t.values())
    }

    /// All routes, verbs in canonical order, each verb in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        Verb::ALL.into_iter().flat_map(move |verb| self.routes(verb))
    }

    #[must_use]
    pub fn table(&self) -> Vec<RouteSummary> {
        self.iter().map(RouteSummary::from).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A route under construction, returned by [`RouteRegistry::add`] and the
/// per-verb shorthands.
///
/// Derefs to the [`Route`] builder. Dropping the handle commits the route,
/// so a `.host()` or `.set_uri()` call made before that decides the table
/// key.
#[derive(Debug)]
pub struct PendingRoute<'a> {
    registry: &'a mut RouteRegistry,
    route: Route,
}

impl Deref for PendingRoute<'_> {
    type Target = Route;

    fn deref(&self) -> &Route {
        &self.route
    }
}

impl DerefMut for PendingRoute<'_> {
    fn deref_mut(&mut self) -> &mut Route {
        &mut self.route
    }
}

impl Drop for PendingRoute<'_> {
    fn drop(&mut self) {
        let placeholder = Route::new(self.route.verb(), String::new(), String::new(), String::new());
        let route = std::mem::replace(&mut self.route, placeholder);
        self.registry.commit(route);
    }
}

/// Handle over the routes created by one [`RouteRegistry::map`] or
/// [`RouteRegistry::any`] call. Builder calls apply to every verb; the
/// routes are committed when the set is dropped.
#[derive(Debug)]
pub struct RouteSet<'a> {
    registry: &'a mut RouteRegistry,
    routes: Vec<Route>,
}

impl RouteSet<'_> {
    fn each(&mut self, mut apply: impl FnMut(&mut Route)) -> &mut Self {
        self.routes.iter_mut().for_each(|route| apply(route));
        self
    }

    pub fn filter(&mut self, filters: impl IntoFilters) -> &mut Self {
        let filters = filters.into_filters();
        self.each(|route| {
            route.filter(filters.clone());
        })
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.each(|route| {
            route.name(name);
        })
    }

    pub fn pattern<I, K, V>(&mut self, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PatternOverride>,
    {
        let overrides: Vec<(String, PatternOverride)> = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.each(|route| {
            route.pattern(overrides.iter().cloned());
        })
    }

    pub fn host(&mut self, host: &str) -> &mut Self {
        self.each(|route| {
            route.host(host);
        })
    }

    /// Verbs this set was registered for
    #[must_use]
    pub fn verbs(&self) -> Vec<Verb> {
        self.routes.iter().map(Route::verb).collect()
    }
}

impl Drop for RouteSet<'_> {
    fn drop(&mut self) {
        for route in std::mem::take(&mut self.routes) {
            self.registry.commit(route);
        }
    }
}
