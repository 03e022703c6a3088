//! # Hot Reload Module
//!
//! Live reloading of a route manifest without restarting the host process.
//!
//! ## Overview
//!
//! [`SharedRegistry`] publishes an immutable [`RouteRegistry`] through
//! `ArcSwap`. Request handlers call [`SharedRegistry::load`] and match
//! against the snapshot they got; a reload builds a complete new registry
//! off to the side and swaps it in with a single pointer store. Readers
//! never lock and never observe a half-built table.
//!
//! [`watch_manifest`] ties this to a file watcher:
//!
//! ```rust,ignore
//! use waypoint::hot_reload::{watch_manifest, SharedRegistry};
//! use waypoint::runtime_config::RouterConfig;
//!
//! let shared = SharedRegistry::from_manifest("routes.yaml", RouterConfig::from_env())?;
//! let _watcher = watch_manifest("routes.yaml", shared.clone(), |registry| {
//!     println!("Reloaded {} routes", registry.len());
//! })?;
//! ```
//!
//! ## Error Handling
//!
//! If the edited manifest fails to parse, registers a bad verb, has a
//! duplicate name or an invalid pattern, the error is logged and the
//! previous registry keeps serving.

use crate::manifest::load_registry;
use crate::registry::{RouteMatch, RouteRegistry};
use crate::runtime_config::RouterConfig;
use arc_swap::ArcSwap;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// A registry that can be replaced atomically while being read
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<ArcSwap<RouteRegistry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: RouteRegistry) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(registry)),
        }
    }

    /// Build the initial registry from a manifest file.
    pub fn from_manifest(path: impl AsRef<Path>, config: RouterConfig) -> anyhow::Result<Self> {
        Ok(Self::new(load_registry(path, config)?))
    }

    /// Current registry snapshot
    #[must_use]
    pub fn load(&self) -> Arc<RouteRegistry> {
        self.inner.load_full()
    }

    /// Replace the published registry
    pub fn store(&self, registry: RouteRegistry) {
        self.inner.store(Arc::new(registry));
    }

    /// Match against the current snapshot
    #[must_use]
    pub fn match_route(&self, method: &str, path: &str, host: &str) -> Option<RouteMatch> {
        self.inner.load().match_route(method, path, host)
    }

    /// Rebuild from `path` and swap it in. On failure the current registry
    /// stays published and the error is returned.
    pub fn reload(&self, path: impl AsRef<Path>) -> anyhow::Result<Arc<RouteRegistry>> {
        let config = *self.inner.load().config();
        let registry = Arc::new(load_registry(path, config)?);
        self.inner.store(Arc::clone(&registry));
        Ok(registry)
    }
}

/// Watch a manifest file and republish the registry when it changes.
///
/// `on_reload` runs after each successful swap with the new registry.
pub fn watch_manifest<P, F>(
    manifest_path: P,
    shared: SharedRegistry,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&RouteRegistry) + Send + 'static,
{
    let path: PathBuf = manifest_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match shared.reload(&watch_path) {
                        Ok(registry) => {
                            info!(
                                manifest = %watch_path.display(),
                                routes_count = registry.len(),
                                "hot-reload: route registry replaced"
                            );
                            on_reload(&registry);
                        }
                        Err(e) => {
                            error!(
                                manifest = %watch_path.display(),
                                error = %format!("{e:#}"),
                                "hot-reload: keeping previous routes"
                            );
                        }
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reload_swaps_registry() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "routes:\n  - {{ uri: /old, controller: Old }}").unwrap();

        let shared = SharedRegistry::from_manifest(file.path(), RouterConfig::default()).unwrap();
        let before = shared.load();
        assert!(shared.match_route("GET", "/old", "").is_some());

        std::fs::write(file.path(), "routes:\n  - { uri: /new, controller: New }\n").unwrap();
        shared.reload(file.path()).unwrap();

        assert!(shared.match_route("GET", "/old", "").is_none());
        assert!(shared.match_route("GET", "/new", "").is_some());
        // Snapshots taken earlier are unaffected
        assert!(before.match_route("GET", "/old", "").is_some());
    }

    #[test]
    fn test_failed_reload_keeps_previous_registry() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "routes:\n  - {{ uri: /ok, controller: Ok }}").unwrap();
        let shared = SharedRegistry::from_manifest(file.path(), RouterConfig::default()).unwrap();

        std::fs::write(
            file.path(),
            "routes:\n  - { uri: /a, controller: A, name: x }\n  - { uri: /b, controller: B, name: x }\n",
        )
        .unwrap();
        assert!(shared.reload(file.path()).is_err());
        assert!(shared.match_route("GET", "/ok", "").is_some());
    }
}
