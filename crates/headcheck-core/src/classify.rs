//! Header classification against a checklist.
//!
//! Partitions a response's headers into checklist names that are present
//! (`expected`), checklist names that are absent (`missing`) and headers the
//! checklist does not mention (`present`). Result maps are ordered by name so
//! equal inputs always produce equal results.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::header_map::HeaderMap;

/// Sizes of the three partitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub expected: usize,
    pub missing: usize,
    pub present: usize,
}

/// Outcome of classifying one response against one checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Checklist names found in the response, with their values.
    pub expected: BTreeMap<String, String>,
    /// Checklist names not found in the response (serialized as `null`).
    pub missing: BTreeMap<String, ()>,
    /// Response headers the checklist does not name.
    pub present: BTreeMap<String, String>,
    pub counts: Counts,
}

/// Classifies `headers` against `checklist`.
///
/// Names are compared exactly; case canonicalization is the caller's job
/// (see [`HeaderMap::canonicalize_names`]). Never fails.
pub fn classify<S: AsRef<str>>(headers: &HeaderMap, checklist: &[S]) -> ClassificationResult {
    let mut expected = BTreeMap::new();
    let mut missing = BTreeMap::new();
    let mut present = BTreeMap::new();

    for name in checklist {
        let name = name.as_ref();
        match headers.get(name) {
            Some(value) => {
                expected.insert(name.to_string(), value.to_string());
            }
            None => {
                missing.insert(name.to_string(), ());
            }
        }
    }

    for (name, value) in headers.iter() {
        if !checklist.iter().any(|c| c.as_ref() == name) {
            present.insert(name.to_string(), value.to_string());
        }
    }

    let counts = Counts {
        expected: expected.len(),
        missing: missing.len(),
        present: present.len(),
    };

    ClassificationResult {
        expected,
        missing,
        present,
        counts,
    }
}
