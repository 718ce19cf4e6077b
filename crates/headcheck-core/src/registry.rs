//! Fixed security-header checklists.
//!
//! Each checklist carries a pair of severity tags: the first applies to a
//! checklist header found in the response, the second to one that is missing.
//! The classifier ignores the tags; renderers use them to pick colors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tag attached to a classified header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warn,
    Info,
}

/// Tags for (present, missing) checklist entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityTags {
    pub present: Severity,
    pub missing: Severity,
}

/// Which checklist to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistKind {
    Expected,
    Deprecated,
    Informational,
    Caching,
}

impl ChecklistKind {
    pub const ALL: [ChecklistKind; 4] = [
        Self::Expected,
        Self::Deprecated,
        Self::Informational,
        Self::Caching,
    ];

    pub fn checklist(self) -> &'static Checklist {
        match self {
            Self::Expected => &EXPECTED,
            Self::Deprecated => &DEPRECATED,
            Self::Informational => &INFORMATIONAL,
            Self::Caching => &CACHING,
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.checklist().title)
    }
}

/// One category of header names.
#[derive(Debug)]
pub struct Checklist {
    pub kind: ChecklistKind,
    pub title: &'static str,
    pub tags: SeverityTags,
    pub items: &'static [&'static str],
}

static EXPECTED: Checklist = Checklist {
    kind: ChecklistKind::Expected,
    title: "Expected headers",
    tags: SeverityTags {
        present: Severity::Success,
        missing: Severity::Error,
    },
    items: &[
        "X-Frame-Options",
        "X-Content-Type-Options",
        "Strict-Transport-Security",
        "Permissions-Policy",
        "Content-Security-Policy",
        "Cross-Origin-Embedder-Policy",
        "Cross-Origin-Resource-Policy",
        "Cross-Origin-Opener-Policy",
        "Referrer-Policy",
    ],
};

static DEPRECATED: Checklist = Checklist {
    kind: ChecklistKind::Deprecated,
    title: "Deprecated headers",
    tags: SeverityTags {
        present: Severity::Warn,
        missing: Severity::Success,
    },
    items: &["X-XSS-Protection", "Expect-CT", "X-Permitted-Cross-Domain-Policies"],
};

static INFORMATIONAL: Checklist = Checklist {
    kind: ChecklistKind::Informational,
    title: "Informational headers",
    tags: SeverityTags {
        present: Severity::Info,
        missing: Severity::Info,
    },
    items: &[
        "X-Powered-By",
        "Server",
        "x-AspNet-Version",
        "X-AspNetMvc-Version",
        "CF-RAY",
    ],
};

static CACHING: Checklist = Checklist {
    kind: ChecklistKind::Caching,
    title: "Caching headers",
    tags: SeverityTags {
        present: Severity::Info,
        missing: Severity::Info,
    },
    items: &["Cache-Control", "Pragma", "Last-Modified", "Expires", "ETag"],
};

/// OWASP secure-headers recommendations for expected headers.
const RECOMMENDED: &[(&str, &str)] = &[
    ("X-Frame-Options", "DENY"),
    ("X-Content-Type-Options", "nosniff"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
    (
        "Strict-Transport-Security",
        "max-age=63072000; includeSubDomains; preload",
    ),
    ("Cross-Origin-Opener-Policy", "same-origin"),
    ("Cross-Origin-Embedder-Policy", "require-corp"),
    ("Cross-Origin-Resource-Policy", "same-site"),
    (
        "Permissions-Policy",
        "geolocation=(), camera=(), microphone=()",
    ),
    ("Content-Security-Policy", "default-src 'self'; frame-ancestors 'none'"),
];

/// Recommended value for a checklist header, if one is known.
pub fn recommended_value(name: &str) -> Option<&'static str> {
    RECOMMENDED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| *v)
}

/// Every header name across all checklists, used to canonicalize wire casing.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    ChecklistKind::ALL
        .into_iter()
        .flat_map(|k| k.checklist().items.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn checklists_have_no_duplicates() {
        for kind in ChecklistKind::ALL {
            let items = kind.checklist().items;
            let unique: HashSet<_> = items.iter().collect();
            assert_eq!(unique.len(), items.len(), "{kind}");
        }
    }

    #[test]
    fn checklists_do_not_overlap() {
        let names: Vec<_> = all_names().map(|n| n.to_ascii_lowercase()).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn kinds_map_to_their_checklist() {
        for kind in ChecklistKind::ALL {
            assert_eq!(kind.checklist().kind, kind);
        }
    }

    #[test]
    fn tags_per_category() {
        let t = ChecklistKind::Expected.checklist().tags;
        assert_eq!((t.present, t.missing), (Severity::Success, Severity::Error));
        let t = ChecklistKind::Deprecated.checklist().tags;
        assert_eq!((t.present, t.missing), (Severity::Warn, Severity::Success));
    }

    #[test]
    fn recommended_values_cover_expected() {
        for name in ChecklistKind::Expected.checklist().items {
            assert!(recommended_value(name).is_some(), "{name}");
        }
        assert_eq!(recommended_value("x-content-type-options"), Some("nosniff"));
        assert_eq!(recommended_value("Server"), None);
    }
}
