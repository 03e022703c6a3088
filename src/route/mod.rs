//! # Route Module
//!
//! A [`Route`] describes one endpoint: a [`Verb`], a uri template such as
//! `/users/:id/role/:role?`, an opaque controller/action pair, an ordered
//! filter list, per-parameter pattern overrides, an optional name and an
//! optional host template.
//!
//! ## Template grammar
//!
//! - Literal segments match exactly (`/users`)
//! - `:name` captures one segment using `:seg` (`[^/]+`) unless the route
//!   carries a pattern override for `name`
//! - `:name?` makes the segment, including its leading slash, optional
//!
//! ## Compilation
//!
//! [`compile_pattern`] turns a template into an anchored regex plus the
//! ordered parameter names:
//!
//! ```rust,ignore
//! let (source, names) = pattern_source("/users/:id/role/:role?", |_| None);
//! assert_eq!(source, "^/users/(?P<p0>[^/]+)/role(?:/(?P<p1>[^/]+))?$");
//! assert_eq!(names, vec!["id".into(), "role".into()]);
//! ```
//!
//! Routes compile lazily on first match and keep the result, so
//! registration stays cheap and matching never recompiles.

mod compile;
mod core;
mod verb;

pub use compile::{compile_pattern, pattern_source, CompiledPattern};
pub(crate) use core::merge_filters;
pub use core::{IntoFilters, Route};
pub use verb::Verb;
