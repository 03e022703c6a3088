//! Read-only request facts consumed by the matcher.
//!
//! The registry never sees a full HTTP request. Whatever server sits in
//! front of it only has to expose the method, the path and the host.

use http::header::HOST;
use http::Request;

/// The three facts matching needs about an incoming request
pub trait RequestFacts {
    /// Uppercase HTTP method (`GET`, `POST`, ...)
    fn method(&self) -> &str;
    /// Request path with a leading slash, without the query string
    fn path(&self) -> &str;
    /// Request host without port; only consulted by host-scoped routes
    fn host(&self) -> &str;
}

/// Owned request facts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestParts {
    pub method: String,
    pub path: String,
    pub host: String,
}

impl RequestParts {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            host: host.into(),
        }
    }

    /// Extract facts from an [`http::Request`].
    ///
    /// The host comes from the request uri authority when present, else from
    /// the `Host` header. Any `:port` suffix is dropped. The path is taken
    /// verbatim (no percent-decoding, no case folding).
    pub fn from_http<B>(req: &Request<B>) -> Self {
        let host = req
            .uri()
            .host()
            .map(str::to_string)
            .or_else(|| {
                req.headers()
                    .get(HOST)
                    .and_then(|v| v.to_str().ok())
                    .map(|h| strip_port(h).to_string())
            })
            .unwrap_or_default();
        Self {
            method: req.method().as_str().to_string(),
            path: req.uri().path().to_string(),
            host,
        }
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons
    if host.starts_with('[') {
        return host
            .find(']')
            .map(|end| &host[..=end])
            .unwrap_or(host);
    }
    host.split(':').next().unwrap_or(host)
}

impl RequestFacts for RequestParts {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn host(&self) -> &str {
        &self.host
    }
}

impl<T: RequestFacts + ?Sized> RequestFacts for &T {
    fn method(&self) -> &str {
        (**self).method()
    }

    fn path(&self) -> &str {
        (**self).path()
    }

    fn host(&self) -> &str {
        (**self).host()
    }
}
