//! # Placeholder Grammar
//!
//! A fixed table of short tokens usable in pattern overrides:
//!
//! | Token    | Regex fragment     |
//! |----------|--------------------|
//! | `:any`   | `.*`               |
//! | `:seg`   | `[^/]+`            |
//! | `:num`   | `[0-9]+`           |
//! | `:slug`  | `[a-z0-9-]+`       |
//! | `:alpha` | `[a-zA-Z]+`        |
//! | `:alnum` | `[a-zA-Z0-9]+`     |
//!
//! `:seg` is the default for every parameter without an override.

use std::fmt;

/// Token used when a parameter has no override.
pub const DEFAULT_TOKEN: &str = ":seg";

/// Token to regex fragment table, in declaration order.
pub const PLACEHOLDERS: [(&str, &str); 6] = [
    (":any", ".*"),
    (":seg", "[^/]+"),
    (":num", "[0-9]+"),
    (":slug", "[a-z0-9-]+"),
    (":alpha", "[a-zA-Z]+"),
    (":alnum", "[a-zA-Z0-9]+"),
];

/// Look up the regex fragment for a placeholder token such as `:num`.
#[must_use]
pub fn fragment_for(token: &str) -> Option<&'static str> {
    PLACEHOLDERS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, fragment)| *fragment)
}

/// Regex fragment for [`DEFAULT_TOKEN`].
#[must_use]
pub fn default_fragment() -> &'static str {
    PLACEHOLDERS[1].1
}

/// Per-parameter replacement for the default `:seg` fragment
///
/// Overrides are classified once when they are set on a route, so the
/// pattern compiler never has to guess whether a string is a token or a
/// raw regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOverride {
    /// One of the [`PLACEHOLDERS`] tokens (stored with its leading `:`)
    Token(&'static str),
    /// A raw regex fragment inserted verbatim into the capture group
    Literal(String),
}

impl PatternOverride {
    /// Classify an override string: known tokens become [`PatternOverride::Token`],
    /// anything else is kept as a raw regex fragment.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match PLACEHOLDERS.iter().find(|(name, _)| *name == raw) {
            Some((name, _)) => PatternOverride::Token(name),
            None => PatternOverride::Literal(raw.to_string()),
        }
    }

    /// Regex fragment this override stands for
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            PatternOverride::Token(token) => fragment_for(token).unwrap_or_else(default_fragment),
            PatternOverride::Literal(regex) => regex,
        }
    }
}

impl From<&str> for PatternOverride {
    fn from(raw: &str) -> Self {
        PatternOverride::parse(raw)
    }
}

impl From<String> for PatternOverride {
    fn from(raw: String) -> Self {
        PatternOverride::parse(&raw)
    }
}

impl fmt::Display for PatternOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternOverride::Token(token) => write!(f, "{token}"),
            PatternOverride::Literal(regex) => write!(f, "{regex}"),
        }
    }
}
