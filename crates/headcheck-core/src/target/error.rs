//! Rejection reasons for user-supplied scan targets.

use thiserror::Error;

/// Schemes that can never return HTTP headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedScheme {
    Ftp,
    Mailto,
    File,
}

impl RejectedScheme {
    pub const ALL: [RejectedScheme; 3] = [Self::Ftp, Self::Mailto, Self::File];

    /// Input prefix that identifies this scheme.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Ftp => "ftp://",
            Self::Mailto => "mailto:",
            Self::File => "file://",
        }
    }

    /// Prefix with surrounding `:` removed, as shown to the user.
    pub fn label(self) -> &'static str {
        self.prefix().trim_matches(':')
    }
}

/// Why a raw target string could not be turned into a [`super::CanonicalUrl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Invalid URL input: {} protocol does not return headers.", .0.label())]
    UnsupportedScheme(RejectedScheme),
    #[error("Invalid URL input: your url is malformed please check it and try again.")]
    MalformedHost,
    /// Covers both a wrong octet count and an octet outside 0..=255.
    #[error("Invalid URL input: dude seriously?")]
    InvalidIpv4Literal,
    #[error("Invalid URL format")]
    InvalidFormat,
}
