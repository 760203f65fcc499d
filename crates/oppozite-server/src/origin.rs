//! Reconstructs the public origin of the deployment serving a request.
//!
//! The base document must come from the same deployment that received the
//! request, so the origin is taken from the proxy headers rather than from
//! configuration.

use axum::http::{header::HOST, HeaderMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub proto: &'static str,
    pub host: String,
}

impl RequestOrigin {
    /// Uses the first `x-forwarded-host` value, else `host`; the scheme is the
    /// first `x-forwarded-proto` value when it is `http`, else `https`.
    ///
    /// Returns `None` when no usable host is present.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let host = first_value(headers, "x-forwarded-host")
            .or_else(|| first_value(headers, HOST.as_str()))
            .filter(|h| is_valid_host(h))?;

        let proto = match first_value(headers, "x-forwarded-proto") {
            Some(p) if p.eq_ignore_ascii_case("http") => "http",
            _ => "https",
        };

        Some(Self {
            proto,
            host: host.to_owned(),
        })
    }

    #[must_use]
    pub fn document_url(&self) -> String {
        format!("{}://{}/index.html", self.proto, self.host)
    }
}

/// First entry of a possibly comma-separated header value.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Host or `host:port`; rejects anything that could change the URL path or
/// userinfo.
fn is_valid_host(host: &str) -> bool {
    host.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']' | '_'))
}
