use crate::hot_reload::{watch_manifest, SharedRegistry};
use crate::logging::init_logging;
use crate::manifest::{load_manifest, load_registry};
use crate::runtime_config::RouterConfig;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;

/// Command-line interface for route manifests
#[derive(Parser)]
#[command(name = "waypoint-routes")]
#[command(about = "Inspect, check and try out route manifests", long_about = None)]
pub struct Cli {
    /// Log level for diagnostics on stderr
    #[arg(long, global = true, default_value = "warn", env = "WAYPOINT_LOG_LEVEL")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the route table in matching order
    List {
        /// Path to the route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Print the table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Match one request against the manifest
    Match {
        /// Path to the route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Uppercase HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Request path, matched verbatim
        #[arg(long)]
        path: String,

        /// Request host, used by host-scoped routes
        #[arg(long, default_value = "")]
        host: String,
    },
    /// Build the registry and validate names and patterns
    Check {
        /// Path to the route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Rebuild the registry whenever the manifest changes
    Watch {
        /// Path to the route manifest (YAML, JSON or TOML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

/// Execute one command, writing results to `out`.
///
/// Returns `Ok(false)` when the command ran but the answer is negative
/// (no match, failed check), so the binary can exit non-zero.
pub fn run_command(command: &Commands, out: &mut dyn Write) -> anyhow::Result<bool> {
    let config = RouterConfig::from_env();
    match command {
        Commands::List { manifest, json } => {
            let registry = load_registry(manifest, config)?;
            let table = registry.table();
            if *json {
                serde_json::to_writer_pretty(&mut *out, &table)?;
                writeln!(out)?;
            } else {
                writeln!(out, "[routes] count={}", table.len())?;
                for route in &table {
                    writeln!(
                        out,
                        "[route] {} {} -> {}@{}{}{}",
                        route.verb,
                        route.uri,
                        route.controller,
                        route.action,
                        route
                            .name
                            .as_deref()
                            .map(|n| format!(" name={n}"))
                            .unwrap_or_default(),
                        if route.filters.is_empty() {
                            String::new()
                        } else {
                            format!(" filters={}", route.filters.join(","))
                        },
                    )?;
                }
            }
            Ok(true)
        }
        Commands::Match {
            manifest,
            method,
            path,
            host,
        } => {
            let registry = load_registry(manifest, config)?;
            match registry.match_route(method, path, host) {
                Some(matched) => {
                    serde_json::to_writer_pretty(&mut *out, &matched)?;
                    writeln!(out)?;
                    Ok(true)
                }
                None => {
                    writeln!(out, "no match: {method} {path}")?;
                    Ok(false)
                }
            }
        }
        Commands::Check { manifest } => {
            let parsed = load_manifest(manifest)?;
            match parsed.build(config) {
                Ok(registry) => {
                    writeln!(out, "ok: {} routes", registry.len())?;
                    Ok(true)
                }
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    Ok(false)
                }
            }
        }
        Commands::Watch { manifest } => {
            let shared = SharedRegistry::from_manifest(manifest, config)?;
            let (tx, rx) = mpsc::channel::<usize>();
            let _watcher = watch_manifest(manifest, shared.clone(), move |registry| {
                // The receiver only goes away when the command exits
                tx.send(registry.len()).ok();
            })
            .context("Failed to watch route manifest")?;

            writeln!(out, "watching {} ({} routes)", manifest.display(), shared.load().len())?;
            out.flush()?;
            for count in rx {
                writeln!(out, "reloaded: {count} routes")?;
                out.flush()?;
            }
            Ok(true)
        }
    }
}

/// Parse arguments, initialize logging and run the selected command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, or if
/// logging cannot be initialized.
pub fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    // Unlocked: `watch` keeps writing for the life of the process
    let mut out = std::io::stdout();
    run_command(&cli.command, &mut out)
}
