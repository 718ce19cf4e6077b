//! Transport failures.

use thiserror::Error;

use crate::config::HttpMethod;

/// Failure to obtain response headers for a target.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, TLS, connection, etc.).
    #[error("request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("HTTP error occurred: {method} {url} returned HTTP {status}")]
    Http {
        method: HttpMethod,
        url: String,
        status: u32,
    },
    #[error("no HTTP response code from {url}")]
    NoStatus { url: String },
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Curl(e) if e.is_operation_timedout())
    }

    /// HTTP status, when the server answered with an error status.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Curl(_) | FetchError::NoStatus { .. } => None,
        }
    }
}
