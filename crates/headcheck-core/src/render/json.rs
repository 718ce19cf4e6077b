//! Structured JSON output for machine consumption.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::classify::ClassificationResult;
use crate::registry::{ChecklistKind, SeverityTags};

use super::{Output, Renderer};

#[derive(Debug, Serialize)]
struct JsonChecklist {
    kind: ChecklistKind,
    name: &'static str,
    tags: SeverityTags,
    #[serde(flatten)]
    result: ClassificationResult,
}

#[derive(Debug, Default, Serialize)]
struct JsonTarget {
    url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checklists: Vec<JsonChecklist>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    read: BTreeMap<String, Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Buffers every item and writes a single JSON array on [`Renderer::finish`],
/// one object per scanned target in emit order.
///
/// The expected-headers list starts a target's object and every error is an
/// object of its own, so a URL scanned twice yields two entries.
pub struct JsonRenderer<W: Write> {
    out: W,
    targets: Vec<JsonTarget>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            targets: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn open(&mut self, url: &str) -> &mut JsonTarget {
        self.targets.push(JsonTarget {
            url: url.to_string(),
            ..Default::default()
        });
        let last = self.targets.len() - 1;
        &mut self.targets[last]
    }

    /// The object being filled for `url`, or a new one.
    fn current(&mut self, url: &str) -> &mut JsonTarget {
        let reuse = matches!(self.targets.last(), Some(t) if t.url == url && t.error.is_none());
        if !reuse {
            return self.open(url);
        }
        let last = self.targets.len() - 1;
        &mut self.targets[last]
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, output: &Output<'_>) -> io::Result<()> {
        match *output {
            // Counts are part of each checklist's result.
            Output::Banner | Output::Counts { .. } => {}
            Output::List {
                checklist,
                url,
                result,
            } => {
                let target = if checklist.kind == ChecklistKind::Expected {
                    self.open(url)
                } else {
                    self.current(url)
                };
                target.checklists.push(JsonChecklist {
                    kind: checklist.kind,
                    name: checklist.title,
                    tags: checklist.tags,
                    result: result.clone(),
                });
            }
            Output::Read { url, values } => {
                let target = self.current(url);
                for v in values {
                    target.read.insert(v.name.clone(), v.value.clone());
                }
            }
            Output::Error { url, message } => {
                self.open(url).error = Some(message.to_string());
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &self.targets)?;
        writeln!(self.out)?;
        self.targets.clear();
        self.out.flush()
    }
}
