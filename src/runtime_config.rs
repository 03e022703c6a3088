//! # Runtime Configuration Module
//!
//! Environment variable driven tunables for the route registry.
//!
//! ## Environment Variables
//!
//! ### `WAYPOINT_CACHE_PATTERNS`
//!
//! Keep each route's compiled regex after the first match (`true`, default)
//! or rebuild it on every match (`false`). Results are identical either way;
//! disabling the cache is only useful when measuring compile cost.
//!
//! ### `WAYPOINT_SLOW_MATCH_US`
//!
//! Matches taking longer than this many microseconds are logged at `warn`.
//! Default: `1000`.
//!
//! ### `WAYPOINT_REGEX_SIZE_LIMIT`
//!
//! Upper bound on the size of a single compiled route regex. Accepts
//! decimal (`1048576`) or hexadecimal (`0x100000`). Default: 1 MiB.
//!
//! ## Usage
//!
//! ```rust
//! use waypoint::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("cache patterns: {}", config.cache_patterns);
//! ```

use std::env;

const DEFAULT_SLOW_MATCH_US: u64 = 1_000;
const DEFAULT_REGEX_SIZE_LIMIT: usize = 0x10_0000;

/// Registry configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Cache compiled route regexes (default: true)
    pub cache_patterns: bool,
    /// Slow match warning threshold in microseconds (default: 1000)
    pub slow_match_us: u64,
    /// Compiled regex size limit in bytes (default: 1 MiB)
    pub regex_size_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            cache_patterns: true,
            slow_match_us: DEFAULT_SLOW_MATCH_US,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let cache_patterns = match env::var("WAYPOINT_CACHE_PATTERNS") {
            Ok(val) => parse_bool(&val).unwrap_or(true),
            Err(_) => true,
        };
        let slow_match_us = env::var("WAYPOINT_SLOW_MATCH_US")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        let regex_size_limit = match env::var("WAYPOINT_REGEX_SIZE_LIMIT") {
            Ok(val) => parse_size(&val).unwrap_or(DEFAULT_REGEX_SIZE_LIMIT),
            Err(_) => DEFAULT_REGEX_SIZE_LIMIT,
        };
        RouterConfig {
            cache_patterns,
            slow_match_us,
            regex_size_limit,
        }
    }
}

pub(crate) fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
