//! Scan target normalization.
//!
//! Turns loosely-formed user input (`example.com`, `http://10.0.0.1:8080/x?y`)
//! into a canonical absolute URL. Parsing is done by hand so the accepted
//! shapes stay exactly the ones listed here; ports, user-info and fragments
//! are carried through without validation.

mod error;
mod host;

use serde::Serialize;
use std::fmt;

pub use error::{RejectedScheme, UrlError};

/// Request scheme of a canonical target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// A validated `scheme://host[path][?query]` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    pub scheme: Scheme,
    /// Netloc as given, including any `:port`.
    pub host: String,
    /// Empty or starting with `/`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme.as_str(), self.host, self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

impl Serialize for CanonicalUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validates and normalizes a raw target string.
///
/// Inputs without `http://` or `https://` get `https://`. `ftp://`, `mailto:`
/// and `file://` are rejected up front. Hosts must look like a dotted name;
/// hosts made only of digits and dots must be a valid IPv4 dotted quad.
///
/// # Examples
///
/// - `normalize("example.com")` → `https://example.com`
/// - `normalize("http://192.168")` → `Err(UrlError::InvalidIpv4Literal)`
pub fn normalize(raw: &str) -> Result<CanonicalUrl, UrlError> {
    if let Some(rejected) = RejectedScheme::ALL
        .into_iter()
        .find(|s| raw.starts_with(s.prefix()))
    {
        return Err(UrlError::UnsupportedScheme(rejected));
    }

    let (scheme, rest) = if let Some(rest) = raw.strip_prefix("http://") {
        (Scheme::Http, rest)
    } else if let Some(rest) = raw.strip_prefix("https://") {
        (Scheme::Https, rest)
    } else {
        (Scheme::Https, raw)
    };

    let (host, path_query) = match rest.find(|c| c == '/' || c == '?') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };
    let (path, query) = path_query.split_once('?').unwrap_or((path_query, ""));

    host::validate_host(host)?;

    if raw.chars().any(char::is_whitespace) {
        return Err(UrlError::InvalidFormat);
    }

    Ok(CanonicalUrl {
        scheme,
        host: host.to_string(),
        path: path.to_string(),
        query: query.to_string(),
    })
}
