//! # CLI Module
//!
//! Console tooling over route manifests, shipped as the `waypoint-routes`
//! binary.
//!
//! ## Commands
//!
//! ### `list`
//!
//! Print the route table in matching order:
//!
//! ```bash
//! waypoint-routes list --manifest routes.yaml
//! waypoint-routes list --manifest routes.yaml --json
//! ```
//!
//! ### `match`
//!
//! Resolve one request and print the bound match as JSON. Exits with
//! status 1 when nothing matches:
//!
//! ```bash
//! waypoint-routes match --manifest routes.yaml --method GET --path /users/23
//! waypoint-routes match -m routes.yaml --method GET --path /dashboard --host acme.example.com
//! ```
//!
//! ### `check`
//!
//! Build the registry, boot names and compile every pattern. Exits with
//! status 1 on the first error.
//!
//! ### `watch`
//!
//! Keep a registry loaded and rebuild it whenever the manifest changes,
//! logging each reload.

mod commands;


pub use commands::{run_cli, run_command, Cli, Commands};
