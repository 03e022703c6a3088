use crate::error::RouteError;
use http::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP verbs a route can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Verb {
    /// All supported verbs in canonical order
    pub const ALL: [Verb; 6] = [
        Verb::Get,
        Verb::Post,
        Verb::Put,
        Verb::Patch,
        Verb::Delete,
        Verb::Options,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
        }
    }

    /// Parse an exact uppercase method name, as supplied by request facts.
    ///
    /// Returns `None` for anything else, including lowercase spellings.
    #[must_use]
    pub fn from_method_str(method: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|v| v.as_str() == method)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = RouteError;

    /// Parse a verb for registration. Case-insensitive, since boot code and
    /// manifests commonly spell verbs in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::from_method_str(&s.trim().to_ascii_uppercase()).ok_or_else(|| {
            RouteError::UnsupportedHttpMethod {
                method: s.to_string(),
            }
        })
    }
}

impl TryFrom<&Method> for Verb {
    type Error = RouteError;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        Verb::from_method_str(method.as_str()).ok_or_else(|| RouteError::UnsupportedHttpMethod {
            method: method.to_string(),
        })
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
            Verb::Options => Method::OPTIONS,
        }
    }
}
