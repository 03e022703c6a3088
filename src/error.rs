use std::fmt;

/// Route registration and boot error
///
/// Every variant describes a configuration mistake made while declaring
/// routes. None of them are produced by matching: a request that does not
/// match any route yields `None`, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The uri template is empty or whitespace-only after prefix joining
    EmptyRouteDefinition {
        /// Verb the route was being registered for
        verb: String,
        /// Raw uri as given (prefix + suffix)
        uri: String,
    },
    /// A verb outside GET, POST, PUT, PATCH, DELETE and OPTIONS
    UnsupportedHttpMethod {
        /// The rejected method string
        method: String,
    },
    /// Two distinct routes carry the same name
    ///
    /// Raised by [`RouteRegistry::boot_names`](crate::registry::RouteRegistry::boot_names).
    DuplicateRouteName {
        /// The conflicting name
        name: String,
        /// `VERB uri` of the route that claimed the name first
        first: String,
        /// `VERB uri` of the route that collided with it
        second: String,
    },
    /// A pattern override did not compile into a valid regex
    InvalidPattern {
        /// `VERB uri` of the offending route
        route: String,
        /// The generated regex source
        pattern: String,
        /// Compiler message from the regex crate
        reason: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::EmptyRouteDefinition { verb, uri } => {
                write!(
                    f,
                    "Route definition error: {verb} route has an empty uri template ('{uri}')"
                )
            }
            RouteError::UnsupportedHttpMethod { method } => {
                write!(
                    f,
                    "Route definition error: unsupported HTTP method '{method}'. \
                    Expected one of GET, POST, PUT, PATCH, DELETE, OPTIONS"
                )
            }
            RouteError::DuplicateRouteName {
                name,
                first,
                second,
            } => {
                write!(
                    f,
                    "Route name error: name '{name}' is used by both '{first}' and '{second}'"
                )
            }
            RouteError::InvalidPattern {
                route,
                pattern,
                reason,
            } => {
                write!(
                    f,
                    "Route pattern error: '{route}' compiled to invalid regex '{pattern}': {reason}"
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
