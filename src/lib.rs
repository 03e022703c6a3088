//! # waypoint
//!
//! **waypoint** is a route registry and request matcher for web
//! frameworks. Boot code declares routes with a small builder API; at
//! request time the registry resolves a `(method, path, host)` tuple to the
//! controller/action that should handle it, together with the parameters
//! captured from the path and host.
//!
//! ## Overview
//!
//! - **[`placeholder`]** - the fixed token table (`:num`, `:slug`, ...) and
//!   per-parameter [`PatternOverride`]s
//! - **[`route`]** - the [`Route`] builder and the pattern compiler that
//!   turns `/users/:id/role/:role?` into an anchored regex
//! - **[`registry`]** - registration, nested groups, the name index and
//!   first-match-wins matching
//! - **[`request`]** - the read-only request facts matching consumes
//! - **[`manifest`]** - YAML/JSON/TOML route files
//! - **[`hot_reload`]** - lock-free registry replacement on manifest edits
//! - **[`runtime_config`]** / **[`logging`]** - environment driven
//!   configuration and structured logging
//! - **[`cli`]** - the `waypoint-routes` console tool
//!
//! ### Request Matching Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Server as Host server
//!     participant Registry as RouteRegistry
//!     participant Route as Route (verb table)
//!     participant Regex as CompiledPattern
//!
//!     Server->>Registry: match_route("GET", "/users/23", host)
//!     Registry->>Registry: look up GET table
//!     loop registration order
//!         Registry->>Route: compiled()
//!         Route->>Regex: compile once, cache
//!         Registry->>Regex: captures(subject)
//!         alt matched
//!             Regex-->>Registry: groups
//!             Registry-->>Server: RouteMatch {controller, action, filters, params}
//!         end
//!     end
//!     Registry-->>Server: None (404 further up)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use waypoint::{GroupOptions, RouteRegistry};
//!
//! # fn main() -> Result<(), waypoint::RouteError> {
//! let mut routes = RouteRegistry::new();
//! routes.get("/users/new", "Users", "create")?;
//! routes
//!     .get("/users/:id", "Users", "show")?
//!     .name("users.show")
//!     .pattern([("id", ":num")]);
//! routes.group(GroupOptions::new().prefix("/admin").filter("auth"), |r| {
//!     r.post("/users/:id/role/:role?", "Roles", "update")?;
//!     Ok(())
//! })?;
//! routes.boot_names()?;
//!
//! let m = routes.match_route("POST", "/admin/users/23/role", "").expect("matched");
//! assert_eq!(m.controller, "Roles");
//! assert_eq!(m.filters, vec!["auth"]);
//! assert_eq!(m.param("id"), Some("23"));
//! assert_eq!(m.param("role"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Registration is single-threaded boot work. Matching takes `&self` and
//! returns an owned [`RouteMatch`]; a booted registry is `Send + Sync` and
//! can be shared behind an `Arc` (or a [`hot_reload::SharedRegistry`]).

pub mod cli;
pub mod error;
pub mod hot_reload;
pub mod logging;
pub mod manifest;
pub mod placeholder;
pub mod registry;
pub mod request;
pub mod route;
pub mod runtime_config;

pub use error::RouteError;
pub use placeholder::PatternOverride;
pub use registry::{GroupOptions, RouteMatch, RouteRegistry};
pub use request::{RequestFacts, RequestParts};
pub use route::{Route, Verb};
