//! Target scanning: normalize, fetch, classify.
//!
//! [`scan_one`] handles a single target on the current thread.
//! [`scan_batch`] fans a list of targets out over blocking tasks with a cap on
//! in-flight requests and returns results in submission order.

mod targets;

use serde::Serialize;
use std::io;
use std::sync::Arc;
use thiserror::Error;

use crate::classify::{classify, ClassificationResult};
use crate::config::RequestConfig;
use crate::fetch_head::{self, FetchError, Response};
use crate::registry::{self, ChecklistKind, SeverityTags};
use crate::render::{Output, Renderer};
use crate::target::{self, CanonicalUrl, UrlError};

pub use targets::{parse_targets, read_targets};

/// What to check for every target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    /// Checklists run in addition to the expected-headers checklist.
    pub extra: Vec<ChecklistKind>,
    /// Header names whose raw values should be reported.
    pub read: Vec<String>,
}

impl ScanRequest {
    /// Checklists to run: expected headers first, then the extras in registry
    /// order, each once.
    pub fn checklists(&self) -> Vec<ChecklistKind> {
        ChecklistKind::ALL
            .into_iter()
            .filter(|k| *k == ChecklistKind::Expected || self.extra.contains(k))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistReport {
    pub kind: ChecklistKind,
    pub title: &'static str,
    pub tags: SeverityTags,
    pub result: ClassificationResult,
}

/// Value of a header requested by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadValue {
    pub name: String,
    pub value: Option<String>,
}

/// Everything learned about one target.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub url: CanonicalUrl,
    pub status: u32,
    pub effective_url: String,
    pub checklists: Vec<ChecklistReport>,
    pub read: Vec<ReadValue>,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Url(#[from] UrlError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("scan task failed: {0}")]
    Task(String),
}

/// A target that could not be scanned, with the input as given.
#[derive(Debug)]
pub struct TargetFailure {
    pub input: String,
    pub error: ScanError,
}

/// Classifies a fetched response against every requested checklist.
///
/// Header names are first aligned to registry spelling, so `x-frame-options`
/// on the wire counts as `X-Frame-Options`. Requested header values are looked
/// up ignoring case.
pub fn build_report(url: CanonicalUrl, response: Response, request: &ScanRequest) -> TargetReport {
    let headers = response.headers.canonicalize_names(registry::all_names());

    let checklists: Vec<ChecklistReport> = request
        .checklists()
        .into_iter()
        .map(|kind| {
            let checklist = kind.checklist();
            let result = classify(&headers, checklist.items);
            tracing::debug!(
                url = %url,
                checklist = checklist.title,
                expected = result.counts.expected,
                missing = result.counts.missing,
                present = result.counts.present,
                "classified"
            );
            ChecklistReport {
                kind,
                title: checklist.title,
                tags: checklist.tags,
                result,
            }
        })
        .collect();

    let read = request
        .read
        .iter()
        .map(|name| ReadValue {
            name: name.clone(),
            value: headers.get_ignore_case(name).map(str::to_string),
        })
        .collect();

    TargetReport {
        url,
        status: response.status,
        effective_url: response.effective_url,
        checklists,
        read,
    }
}

/// Scans one raw target, validated exactly as given. Blocks on network I/O.
pub fn scan_one(
    raw: &str,
    cfg: &RequestConfig,
    request: &ScanRequest,
) -> Result<TargetReport, ScanError> {
    let url = target::normalize(raw).inspect_err(|e| {
        tracing::warn!(input = raw, "rejected: {}", e);
    })?;
    let response = fetch_head::fetch(&url, cfg).inspect_err(|e| {
        tracing::warn!(url = %url, "fetch failed: {}", e);
    })?;
    tracing::info!(url = %url, status = response.status, "fetched headers");
    Ok(build_report(url, response, request))
}

/// Scans `targets` with at most `max_in_flight` requests running at once.
///
/// One target's failure does not stop the others. The returned vector has one
/// entry per input, in input order.
pub async fn scan_batch(
    targets: Vec<String>,
    cfg: Arc<RequestConfig>,
    request: Arc<ScanRequest>,
    max_in_flight: usize,
) -> Vec<Result<TargetReport, TargetFailure>> {
    let max_in_flight = max_in_flight.max(1);
    let mut slots: Vec<Option<Result<TargetReport, ScanError>>> =
        targets.iter().map(|_| None).collect();
    let mut pending = targets.iter().cloned().enumerate();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_in_flight {
            let Some((idx, raw)) = pending.next() else {
                break;
            };
            let cfg = Arc::clone(&cfg);
            let request = Arc::clone(&request);
            join_set.spawn_blocking(move || (idx, scan_one(&raw, &cfg, &request)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        match res {
            Ok((idx, outcome)) => slots[idx] = Some(outcome),
            Err(e) => tracing::error!("scan task join: {}", e),
        }
    }

    targets
        .into_iter()
        .zip(slots)
        .map(|(input, slot)| {
            let outcome = slot.unwrap_or_else(|| {
                Err(ScanError::Task("task ended without a result".to_string()))
            });
            outcome.map_err(|error| TargetFailure { input, error })
        })
        .collect()
}

/// Feeds scan results to a renderer: counts then list for every checklist,
/// requested header values, and one error item per failed target.
pub fn emit(
    results: &[Result<TargetReport, TargetFailure>],
    renderer: &mut dyn Renderer,
) -> io::Result<()> {
    for res in results {
        match res {
            Ok(report) => {
                let url = report.url.to_string();
                for c in &report.checklists {
                    let checklist = c.kind.checklist();
                    renderer.render(&Output::Counts {
                        checklist,
                        url: &url,
                        counts: c.result.counts,
                    })?;
                    renderer.render(&Output::List {
                        checklist,
                        url: &url,
                        result: &c.result,
                    })?;
                }
                if !report.read.is_empty() {
                    renderer.render(&Output::Read {
                        url: &url,
                        values: &report.read,
                    })?;
                }
            }
            Err(failure) => {
                let message = failure.error.to_string();
                renderer.render(&Output::Error {
                    url: &failure.input,
                    message: &message,
                })?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
