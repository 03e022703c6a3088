use super::compile::{compile_pattern, CompiledPattern};
use super::verb::Verb;
use crate::error::RouteError;
use crate::placeholder::PatternOverride;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::borrow::Cow;

/// One or more filter names accepted by [`Route::filter`].
pub trait IntoFilters {
    fn into_filters(self) -> Vec<String>;
}

impl IntoFilters for &str {
    fn into_filters(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFilters for String {
    fn into_filters(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoFilters for &[&str] {
    fn into_filters(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoFilters for [&str; N] {
    fn into_filters(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl IntoFilters for Vec<String> {
    fn into_filters(self) -> Vec<String> {
        self
    }
}

impl IntoFilters for Vec<&str> {
    fn into_filters(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoFilters for &[String] {
    fn into_filters(self) -> Vec<String> {
        self.to_vec()
    }
}

/// Append `incoming` to `filters`, skipping names already present.
pub(crate) fn merge_filters(filters: &mut Vec<String>, incoming: impl IntoIterator<Item = String>) {
    for filter in incoming {
        if !filters.contains(&filter) {
            filters.push(filter);
        }
    }
}

/// A single registered endpoint: one verb, one uri template
///
/// Routes are built by the registry's `get`/`post`/... methods and then
/// refined through the chainable builder methods:
///
/// ```rust
/// use waypoint::registry::RouteRegistry;
///
/// let mut routes = RouteRegistry::new();
/// routes
///     .get("/users/:id", "Users", "show")?
///     .name("users.show")
///     .filter("auth")
///     .pattern([("id", ":num")]);
/// # Ok::<(), waypoint::RouteError>(())
/// ```
///
/// Once registration is over a route is only read. Matching never writes
/// into it; extracted parameters live in a separate
/// [`RouteMatch`](crate::registry::RouteMatch).
#[derive(Debug, Clone)]
pub struct Route {
    verb: Verb,
    /// Uri as registered, without any host
    path: String,
    /// Effective template: `host/path` for host-scoped routes, else `path`
    uri: String,
    controller: String,
    action: String,
    filters: Vec<String>,
    patterns: IndexMap<String, PatternOverride>,
    name: Option<String>,
    host: Option<String>,
    /// Registration serial; routes registered by one `map`/`any` call share it
    origin: u64,
    compiled: OnceCell<CompiledPattern>,
}

impl Route {
    #[must_use]
    pub fn new(
        verb: Verb,
        uri: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let path = uri.into();
        Self {
            verb,
            uri: path.clone(),
            path,
            controller: controller.into(),
            action: action.into(),
            filters: Vec::new(),
            patterns: IndexMap::new(),
            name: None,
            host: None,
            origin: 0,
            compiled: OnceCell::new(),
        }
    }

    pub fn set_verb(&mut self, verb: Verb) -> &mut Self {
        self.verb = verb;
        self
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.path = uri.into();
        self.rebuild_uri();
        self
    }

    pub fn set_controller(&mut self, controller: impl Into<String>) -> &mut Self {
        self.controller = controller.into();
        self
    }

    pub fn set_action(&mut self, action: impl Into<String>) -> &mut Self {
        self.action = action.into();
        self
    }

    /// Append one or more filters. Names already present are ignored, so
    /// `filter("auth")` twice is the same as once.
    pub fn filter(&mut self, filters: impl IntoFilters) -> &mut Self {
        merge_filters(&mut self.filters, filters.into_filters());
        self
    }

    /// Set the route name. Uniqueness is checked by
    /// [`RouteRegistry::boot_names`](crate::registry::RouteRegistry::boot_names).
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the per-parameter pattern overrides.
    ///
    /// Values are either placeholder tokens (`":num"`) or raw regex
    /// fragments (`"[0-9]{4}"`).
    pub fn pattern<I, K, V>(&mut self, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PatternOverride>,
    {
        self.patterns = overrides
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.compiled = OnceCell::new();
        self
    }

    /// Scope this route to a host. The effective template becomes
    /// `host + "/" + uri` with the uri's slashes trimmed. A host beginning
    /// with a placeholder (`:tenant.example.com`) captures the subdomain.
    pub fn host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self.rebuild_uri();
        self
    }

    fn rebuild_uri(&mut self) {
        self.uri = match &self.host {
            Some(host) => format!("{}/{}", host, self.path.trim_matches('/')),
            None => self.path.clone(),
        };
        self.compiled = OnceCell::new();
    }

    pub(crate) fn set_origin(&mut self, origin: u64) -> &mut Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Effective uri template, including the host for host-scoped routes
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Uri as registered, without the host
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn patterns(&self) -> &IndexMap<String, PatternOverride> {
        &self.patterns
    }

    #[must_use]
    pub fn host_template(&self) -> Option<&str> {
        self.host.as_deref()
    }

    #[must_use]
    pub fn is_host_scoped(&self) -> bool {
        self.host.is_some()
    }

    /// Host-scoped route whose template starts with a placeholder
    #[must_use]
    pub fn has_wildcard_host(&self) -> bool {
        self.host.is_some() && self.uri.starts_with(':')
    }

    pub(crate) fn origin(&self) -> u64 {
        self.origin
    }

    /// `VERB uri`, used in logs and error messages
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.verb, self.uri)
    }

    /// Compile this route's template.
    ///
    /// With `cache` set the result is kept for the lifetime of the route;
    /// otherwise the regex is rebuilt on each call.
    pub fn compiled(
        &self,
        cache: bool,
        size_limit: usize,
    ) -> Result<Cow<'_, CompiledPattern>, RouteError> {
        if cache {
            self.compiled
                .get_or_try_init(|| self.compile(size_limit))
                .map(Cow::Borrowed)
        } else {
            self.compile(size_limit).map(Cow::Owned)
        }
    }

    fn compile(&self, size_limit: usize) -> Result<CompiledPattern, RouteError> {
        compile_pattern(&self.uri, |name| self.patterns.get(name), size_limit).map_err(
            |(pattern, e)| RouteError::InvalidPattern {
                route: self.describe(),
                pattern,
                reason: e.to_string(),
            },
        )
    }
}
