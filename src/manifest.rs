//! # Route Manifest
//!
//! Declarative route files for boot code and tooling that would rather not
//! register routes in Rust. A manifest drives the same builder API as
//! hand-written registration, so ordering, scoping and naming rules are
//! identical.
//!
//! ```yaml
//! routes:
//!   - { verb: GET, uri: /users/new, controller: Users, action: create }
//!   - verb: GET
//!     uri: /users/:id
//!     controller: Users
//!     action: show
//!     name: users.show
//!     patterns: { id: ":num" }
//! groups:
//!   - prefix: /admin
//!     filters: [auth]
//!     routes:
//!       - { verbs: [GET, POST], uri: /settings, controller: Settings }
//!       - { verb: ANY, uri: /ping, controller: Health, action: ping }
//! ```
//!
//! Within a level, `routes` register before nested `groups`. A route
//! without `verb`/`verbs` is a GET route; `action` defaults to `index`.
//! YAML (`.yaml`/`.yml`), JSON (`.json`) and TOML (`.toml`) are accepted.

use crate::error::RouteError;
use crate::registry::{GroupOptions, RouteRegistry, DEFAULT_ACTION};
use crate::route::Verb;
use crate::runtime_config::RouterConfig;
use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Verb spelling that registers a route for every supported verb
pub const ANY_VERB: &str = "ANY";

/// Manifest file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
    Toml,
}

impl ManifestFormat {
    /// Pick the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => ManifestFormat::Json,
            Some("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Yaml,
        }
    }
}

fn default_action() -> String {
    DEFAULT_ACTION.to_string()
}

/// One route entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteDef {
    /// Single verb, or `ANY`
    #[serde(default)]
    pub verb: Option<String>,
    /// Several verbs registered through `map`
    #[serde(default)]
    pub verbs: Vec<String>,
    pub uri: String,
    pub controller: String,
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "filter")]
    pub filters: Vec<String>,
    #[serde(default, alias = "pattern")]
    pub patterns: IndexMap<String, String>,
    #[serde(default)]
    pub host: Option<String>,
}

/// A nested group: scope options plus its own routes and groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupDef {
    #[serde(flatten)]
    pub options: GroupOptions,
    pub routes: Vec<RouteDef>,
    pub groups: Vec<GroupDef>,
}

/// Top-level manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub routes: Vec<RouteDef>,
    pub groups: Vec<GroupDef>,
}

impl Manifest {
    /// Parse a manifest from a string in the given format.
    pub fn parse(content: &str, format: ManifestFormat) -> anyhow::Result<Self> {
        let manifest = match format {
            ManifestFormat::Yaml => {
                serde_yaml::from_str(content).context("Failed to parse YAML route manifest")?
            }
            ManifestFormat::Json => {
                serde_json::from_str(content).context("Failed to parse JSON route manifest")?
            }
            ManifestFormat::Toml => {
                toml::from_str(content).context("Failed to parse TOML route manifest")?
            }
        };
        Ok(manifest)
    }

    /// Register every route into `registry` under its current scope.
    pub fn register(&self, registry: &mut RouteRegistry) -> Result<(), RouteError> {
        register_level(registry, &self.routes, &self.groups)
    }

    /// Build a fresh registry, then boot names and validate every pattern.
    pub fn build(&self, config: RouterConfig) -> Result<RouteRegistry, RouteError> {
        let mut registry = RouteRegistry::with_config(config);
        self.register(&mut registry)?;
        registry.boot_names()?;
        registry.validate()?;
        Ok(registry)
    }
}

fn register_level(
    registry: &mut RouteRegistry,
    routes: &[RouteDef],
    groups: &[GroupDef],
) -> Result<(), RouteError> {
    for def in routes {
        def.register(registry)?;
    }
    for group in groups {
        registry.group(group.options.clone(), |r| {
            register_level(r, &group.routes, &group.groups)
        })?;
    }
    Ok(())
}

impl RouteDef {
    fn register(&self, registry: &mut RouteRegistry) -> Result<(), RouteError> {
        let patterns = self.patterns.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        let single = match (&self.verb, self.verbs.is_empty()) {
            (Some(verb), true) if verb.eq_ignore_ascii_case(ANY_VERB) => None,
            (Some(verb), true) => Some(verb.parse::<Verb>()?),
            (None, true) => Some(Verb::Get),
            (verb, false) => {
                let mut verbs = self.verbs.clone();
                verbs.extend(verb.iter().cloned());
                let mut set =
                    registry.map(&verbs, &self.uri, &self.controller, &self.action)?;
                set.filter(self.filters.clone()).pattern(patterns);
                if let Some(host) = &self.host {
                    set.host(host);
                }
                if let Some(name) = &self.name {
                    set.name(name);
                }
                return Ok(());
            }
        };

        match single {
            Some(verb) => {
                let mut route = registry.add(verb, &self.uri, &self.controller, &self.action)?;
                route.filter(self.filters.clone()).pattern(patterns);
                if let Some(host) = &self.host {
                    route.host(host.as_str());
                }
                if let Some(name) = &self.name {
                    route.name(name.as_str());
                }
            }
            None => {
                let mut set = registry.any(&self.uri, &self.controller, &self.action)?;
                set.filter(self.filters.clone()).pattern(patterns);
                if let Some(host) = &self.host {
                    set.host(host);
                }
                if let Some(name) = &self.name {
                    set.name(name);
                }
            }
        }
        Ok(())
    }
}

/// Read and parse a manifest file, picking the format from its extension.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read route manifest {}", path.display()))?;
    let manifest = Manifest::parse(&content, ManifestFormat::from_path(path))
        .with_context(|| format!("Invalid route manifest {}", path.display()))?;
    info!(
        manifest = %path.display(),
        routes = manifest.routes.len(),
        groups = manifest.groups.len(),
        "Route manifest loaded"
    );
    Ok(manifest)
}

/// Load a manifest file and build a validated registry from it.
pub fn load_registry(path: impl AsRef<Path>, config: RouterConfig) -> anyhow::Result<RouteRegistry> {
    let path = path.as_ref();
    let manifest = load_manifest(path)?;
    manifest
        .build(config)
        .with_context(|| format!("Route manifest {} failed to boot", path.display()))
}
