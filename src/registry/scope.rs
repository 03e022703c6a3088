use super::core::RouteRegistry;
use crate::route::{merge_filters, IntoFilters};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};

/// Options for one [`RouteRegistry::group`] level
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupOptions {
    /// Appended verbatim to the enclosing prefix
    pub prefix: String,
    /// Added to the enclosing filters, duplicates dropped
    #[serde(alias = "filter")]
    pub filters: Vec<String>,
    /// Replaces the enclosing host when set
    pub host: Option<String>,
}

impl GroupOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn filter(mut self, filters: impl IntoFilters) -> Self {
        merge_filters(&mut self.filters, filters.into_filters());
        self
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }
}

/// Composed `{prefix, filters, host}` in effect while routes are declared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub prefix: String,
    pub filters: Vec<String>,
    pub host: Option<String>,
}

impl Scope {
    /// Compose a nested scope. Prefixes are concatenated without slash
    /// normalization; that happens when a route is registered.
    #[must_use]
    pub fn merge(&self, options: &GroupOptions) -> Scope {
        let mut filters = self.filters.clone();
        merge_filters(&mut filters, options.filters.iter().cloned());
        Scope {
            prefix: format!("{}{}", self.prefix, options.prefix),
            filters,
            host: options.host.clone().or_else(|| self.host.clone()),
        }
    }
}

/// Pops scope frames pushed after `depth` when dropped, including while
/// unwinding out of a panicking group callback.
pub(crate) struct ScopeGuard<'a> {
    registry: &'a mut RouteRegistry,
    depth: usize,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn push(registry: &'a mut RouteRegistry, scope: Scope) -> Self {
        let depth = registry.scopes.len();
        registry.scopes.push(scope);
        Self { registry, depth }
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.registry.scopes.truncate(self.depth);
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = RouteRegistry;

    fn deref(&self) -> &RouteRegistry {
        self.registry
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut RouteRegistry {
        self.registry
    }
}

/// Join a scope prefix and a route uri with exactly one slash between
/// them. Repeated slashes collapse and a trailing slash is dropped; two
/// empty parts give `/`.
#[must_use]
pub fn join_uri(prefix: &str, uri: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(uri.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
