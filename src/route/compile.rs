//! Pattern compiler: uri template + overrides -> anchored regex.
//!
//! Each parameter is wrapped in a named group (`p0`, `p1`, ...) so a raw
//! override fragment may contain its own groups without shifting the
//! positions of later parameters.

use crate::placeholder::{default_fragment, PatternOverride};
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// Regex compiled from a uri template plus its ordered parameter names
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Anchored regex (`^/...$`)
    pub regex: Regex,
    /// Parameter names in template declaration order
    pub param_names: Vec<Arc<str>>,
    /// Capture group index of each parameter, parallel to `param_names`
    pub group_indices: Vec<usize>,
}

impl CompiledPattern {
    /// Capture group name for the parameter at `index`
    #[inline]
    #[must_use]
    pub fn group_name(index: usize) -> String {
        format!("p{index}")
    }
}

/// Build the regex source for a uri template without compiling it.
///
/// Returns the pattern string and the parameter names in order. Literal
/// segments are escaped; empty segments (leading, trailing or doubled
/// slashes) are skipped.
pub fn pattern_source<'a, F>(template: &str, lookup: F) -> (String, Vec<Arc<str>>)
where
    F: Fn(&str) -> Option<&'a PatternOverride>,
{
    let mut body = String::with_capacity(template.len() + 16);
    let mut param_names: Vec<Arc<str>> = Vec::with_capacity(template.matches(':').count());

    for segment in template.split('/').filter(|s| !s.is_empty()) {
        let Some(param) = segment.strip_prefix(':') else {
            body.push('/');
            body.push_str(&regex::escape(segment));
            continue;
        };

        let (name, optional) = match param.strip_suffix('?') {
            Some(name) => (name, true),
            None => (param, false),
        };
        let fragment = lookup(name)
            .map(PatternOverride::fragment)
            .unwrap_or(default_fragment());
        let group = CompiledPattern::group_name(param_names.len());

        if !optional {
            body.push_str(&format!("/(?P<{group}>{fragment})"));
        } else if body.is_empty() {
            // The leading slash is never optional: `/:page?` matches `/` and `/2`
            body.push_str(&format!("/(?P<{group}>{fragment})?"));
        } else {
            body.push_str(&format!("(?:/(?P<{group}>{fragment}))?"));
        }
        param_names.push(Arc::from(name));
    }

    if body.is_empty() {
        body.push('/');
    }
    (format!("^{body}$"), param_names)
}

/// Compile a uri template into an anchored regex.
///
/// `size_limit` bounds the compiled program size (see
/// [`RouterConfig::regex_size_limit`](crate::runtime_config::RouterConfig)).
pub fn compile_pattern<'a, F>(
    template: &str,
    lookup: F,
    size_limit: usize,
) -> Result<CompiledPattern, (String, regex::Error)>
where
    F: Fn(&str) -> Option<&'a PatternOverride>,
{
    let (source, param_names) = pattern_source(template, lookup);
    match RegexBuilder::new(&source).size_limit(size_limit).build() {
        Ok(regex) => {
            let group_indices = (0..param_names.len())
                .map(|i| {
                    let group = CompiledPattern::group_name(i);
                    regex
                        .capture_names()
                        .position(|n| n == Some(group.as_str()))
                        .unwrap_or(0)
                })
                .collect();
            Ok(CompiledPattern {
                regex,
                param_names,
                group_indices,
            })
        }
        Err(e) => Err((source, e)),
    }
}
