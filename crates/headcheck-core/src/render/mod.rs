//! Rendering of scan results.
//!
//! [`Output`] is the closed set of things a scan can report. Each renderer
//! handles every variant; [`ConsoleRenderer`] writes colorized text lines and
//! [`JsonRenderer`] buffers everything into one JSON document.

mod console;
mod json;
mod palette;

use std::io;

use crate::classify::{ClassificationResult, Counts};
use crate::registry::Checklist;
use crate::scan::ReadValue;

pub use console::ConsoleRenderer;
pub use json::JsonRenderer;

/// One renderable item.
#[derive(Debug, Clone, Copy)]
pub enum Output<'a> {
    Banner,
    Counts {
        checklist: &'a Checklist,
        url: &'a str,
        counts: Counts,
    },
    List {
        checklist: &'a Checklist,
        url: &'a str,
        result: &'a ClassificationResult,
    },
    /// Values of individually requested headers.
    Read {
        url: &'a str,
        values: &'a [ReadValue],
    },
    Error {
        url: &'a str,
        message: &'a str,
    },
}

pub trait Renderer {
    fn render(&mut self, output: &Output<'_>) -> io::Result<()>;

    /// Flushes anything buffered. Called once after the last item.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
