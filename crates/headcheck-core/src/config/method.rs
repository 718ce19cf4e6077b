//! Request verb selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Verbs that return headers without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    #[default]
    Head,
    Options,
}

/// Well-known verbs that would modify server state.
const UNSUPPORTED: [&str; 6] = ["POST", "PUT", "DELETE", "PATCH", "TRACE", "CONNECT"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    #[error("Invalid method input: your method is not currently supported please use GET HEAD or OPTIONS")]
    Unsupported(String),
    #[error("Invalid method input: your method is invalid please use GET HEAD or OPTIONS")]
    Invalid(String),
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = MethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Ok(HttpMethod::Get),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            other if UNSUPPORTED.contains(&other) => Err(MethodError::Unsupported(other.to_string())),
            _ => Err(MethodError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = MethodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(m: HttpMethod) -> Self {
        m.as_str().to_string()
    }
}
