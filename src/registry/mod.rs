//! # Registry Module
//!
//! The [`RouteRegistry`] owns every registered route, grouped per verb in
//! registration order, plus the group scope stack and the route name index.
//!
//! ## Overview
//!
//! The registry works in two phases:
//!
//! 1. **Registration** (boot, single-threaded): `get`/`post`/.../`map`/`any`
//!    declare routes under the current [`Scope`]; `group` nests scopes;
//!    `boot_names` builds and validates the name index.
//!
//! 2. **Matching** (per request, any number of threads): `match_route`
//!    walks the verb's routes in registration order and returns the first
//!    match as an owned [`RouteMatch`].
//!
//! ## Example
//!
//! ```rust
//! use waypoint::registry::{GroupOptions, RouteRegistry};
//!
//! # fn main() -> Result<(), waypoint::RouteError> {
//! let mut routes = RouteRegistry::new();
//! routes.get("/users/new", "Users", "create")?;
//! routes.get("/users/:id", "Users", "show")?.name("users.show");
//! routes.group(GroupOptions::new().host(":tenant.example.com"), |r| {
//!     r.get("/dashboard", "Dashboard", "index")?;
//!     Ok(())
//! })?;
//! routes.boot_names()?;
//!
//! let m = routes.match_route("GET", "/users/23", "").expect("matched");
//! assert_eq!(m.action, "show");
//! assert_eq!(m.param("id"), Some("23"));
//!
//! let m = routes
//!     .match_route("GET", "/dashboard", "acme.example.com")
//!     .expect("matched");
//! assert_eq!(m.param("tenant"), Some("acme"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Ordering
//!
//! Matching is linear in the number of routes for the verb. Earlier routes
//! win on overlap, so register `/users/new` before `/users/:id`.

mod core;
mod matching;
mod scope;

pub use core::{PendingRoute, RouteRegistry, RouteSet, RouteSummary, DEFAULT_ACTION};
pub use matching::{ParamVec, RouteMatch, MAX_INLINE_PARAMS};
pub use scope::{join_uri, GroupOptions, Scope};
