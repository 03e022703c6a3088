//! Request matching - the per-request hot path.
//!
//! Routes for the request verb are tried in registration order and the
//! first regex that matches wins. Nothing here mutates the registry.

use super::core::RouteRegistry;
use crate::request::RequestFacts;
use crate::route::{Route, Verb};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted parameters in template declaration order.
///
/// Names are shared with the compiled pattern (`Arc<str>`), values are
/// per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of a successful match
///
/// Built fresh for every request, so concurrent matches against one shared
/// registry never see each other's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub verb: Verb,
    /// Template that matched (including the host for host-scoped routes)
    pub uri: String,
    pub name: Option<String>,
    pub controller: String,
    pub action: String,
    pub filters: Vec<String>,
    /// Captured parameters; optional parameters that were absent are omitted
    #[serde(serialize_with = "serialize_params")]
    pub params: ParamVec,
    /// Request path as supplied by the caller
    pub matched_path: String,
}

impl RouteMatch {
    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics if a template repeats a name.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters as an insertion-ordered map
    /// Note: This allocates - use param() in hot paths instead
    #[must_use]
    pub fn params_map(&self) -> IndexMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

fn serialize_params<S: Serializer>(params: &ParamVec, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (name, value) in params {
        map.serialize_entry(name.as_ref(), value)?;
    }
    map.end()
}

/// Subject string for host-scoped routes: `/host/path` with the path's
/// slashes trimmed, so it lines up with a `host/uri` template compiled to
/// `^/...$`.
pub(crate) fn host_subject(host: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        format!("/{host}")
    } else {
        format!("/{host}/{path}")
    }
}

/// First dot-separated label of a compound `subdomain.domain` string
fn first_label(s: &str) -> &str {
    s.split('.').next().unwrap_or(s)
}

impl RouteRegistry {
    /// Match a request against the registered routes.
    ///
    /// `method` must be an uppercase verb; anything unsupported is simply
    /// "no match". `host` is only consulted for host-scoped routes. The path
    /// is matched exactly as given: no case folding and no percent-decoding.
    ///
    /// # Returns
    ///
    /// * `Some(RouteMatch)` - the first route, in registration order, whose
    ///   pattern matches
    /// * `None` - no route matched (typically a 404 further up)
    #[must_use]
    pub fn match_route(&self, method: &str, path: &str, host: &str) -> Option<RouteMatch> {
        debug!(
            method = %method,
            path = %path,
            host = %host,
            "Route match attempt"
        );

        let match_start = Instant::now();
        let result = Verb::from_method_str(method)
            .and_then(|verb| self.routes.get(&verb))
            .and_then(|table| table.values().find_map(|route| self.try_route(route, path, host)));
        let match_duration = match_start.elapsed();

        match &result {
            Some(matched) => {
                if match_duration > Duration::from_micros(self.config.slow_match_us) {
                    warn!(
                        method = %method,
                        path = %path,
                        route_pattern = %matched.uri,
                        controller = %matched.controller,
                        action = %matched.action,
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    info!(
                        method = %method,
                        path = %path,
                        route_pattern = %matched.uri,
                        controller = %matched.controller,
                        action = %matched.action,
                        path_params = ?matched.params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }

    /// [`match_route`](Self::match_route) over any [`RequestFacts`] view
    #[must_use]
    pub fn match_request<R: RequestFacts + ?Sized>(&self, request: &R) -> Option<RouteMatch> {
        self.match_route(request.method(), request.path(), request.host())
    }

    fn try_route(&self, route: &Route, path: &str, host: &str) -> Option<RouteMatch> {
        let compiled = match route.compiled(self.config.cache_patterns, self.config.regex_size_limit)
        {
            Ok(compiled) => compiled,
            Err(e) => {
                warn!(route = %route.describe(), error = %e, "Skipping route with invalid pattern");
                return None;
            }
        };

        let subject: Cow<'_, str> = if route.is_host_scoped() {
            Cow::Owned(host_subject(host, path))
        } else {
            Cow::Borrowed(path)
        };
        let captures = compiled.regex.captures(&subject)?;

        let wildcard = route.has_wildcard_host();
        let mut params = ParamVec::new();
        for (i, (name, &group)) in compiled
            .param_names
            .iter()
            .zip(&compiled.group_indices)
            .enumerate()
        {
            let Some(value) = captures.get(group) else {
                continue;
            };
            let value = value.as_str().trim_matches('/');
            if i == 0 && wildcard {
                // `:tenant.example.com` captured `acme.example.com`
                params.push((Arc::from(first_label(name)), first_label(value).to_string()));
            } else {
                params.push((Arc::clone(name), value.to_string()));
            }
        }

        Some(RouteMatch {
            verb: route.verb(),
            uri: route.uri().to_string(),
            name: route.route_name().map(str::to_string),
            controller: route.controller().to_string(),
            action: route.action().to_string(),
            filters: route.filters().to_vec(),
            params,
            matched_path: path.to_string(),
        })
    }
}
