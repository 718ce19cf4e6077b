//! Colorized line-oriented console output.

use std::io::{self, Write};

use crate::config::ColorMode;
use crate::registry::{self, Severity};

use super::palette::paint;
use super::{Output, Renderer};

const BANNER: &str = r#"
  _                    _     _               _
 | |__   ___  __ _  __| | __| |__   ___  ___| | __
 | '_ \ / _ \/ _` |/ _` |/ __| '_ \ / _ \/ __| |/ /
 | | | |  __/ (_| | (_| | (__| | | |  __/ (__|   <
 |_| |_|\___|\__,_|\__,_|\___|_| |_|\___|\___|_|\_\
"#;

pub struct ConsoleRenderer<W: Write> {
    out: W,
    mode: ColorMode,
    /// Also list response headers that are not on the checklist.
    show_other: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, mode: ColorMode) -> Self {
        Self {
            out,
            mode,
            show_other: false,
        }
    }

    pub fn show_other_headers(mut self, show: bool) -> Self {
        self.show_other = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, output: &Output<'_>) -> io::Result<()> {
        let mode = self.mode;
        let show_other = self.show_other;
        let out = &mut self.out;
        match *output {
            Output::Banner => {
                writeln!(out, "{}", paint(BANNER, Severity::Info, mode))?;
                writeln!(out, "      A simple tool for checking security HEADers\n")?;
            }
            Output::Counts {
                checklist,
                url,
                counts,
            } => {
                let tags = checklist.tags;
                writeln!(
                    out,
                    "[*] {} for {}: {} found, {} missing, {} other",
                    checklist.title,
                    url,
                    paint(&counts.expected.to_string(), tags.present, mode),
                    paint(&counts.missing.to_string(), tags.missing, mode),
                    counts.present,
                )?;
            }
            Output::List {
                checklist,
                url,
                result,
            } => {
                let tags = checklist.tags;
                let splat = paint("*", Severity::Info, mode);
                let bang = paint("!", tags.missing, mode);
                writeln!(
                    out,
                    "[{}] Analyzing {} of {}",
                    splat,
                    paint(checklist.title, Severity::Info, mode),
                    paint(url, Severity::Info, mode)
                )?;
                for (name, value) in &result.expected {
                    writeln!(
                        out,
                        "[{}] Header {} is present! (Value: {})",
                        paint("+", tags.present, mode),
                        paint(name, tags.present, mode),
                        paint(value, Severity::Info, mode)
                    )?;
                }
                for name in result.missing.keys() {
                    write!(
                        out,
                        "[{}] Missing header: {}",
                        bang,
                        paint(name, tags.missing, mode)
                    )?;
                    match registry::recommended_value(name) {
                        Some(rec) => writeln!(out, " (recommended: {})", rec)?,
                        None => writeln!(out)?,
                    }
                }
                if show_other {
                    for (name, value) in &result.present {
                        writeln!(out, "[{}] {}: {}", splat, name, value)?;
                    }
                }
            }
            Output::Read { url, values } => {
                writeln!(out, "[*] Requested headers of {}", url)?;
                for v in values {
                    let value = v.value.as_deref().unwrap_or("<absent>");
                    writeln!(out, "\t{}: {}", v.name, value)?;
                }
            }
            Output::Error { url, message } => {
                writeln!(
                    out,
                    "[{}] {}: {}",
                    paint("!", Severity::Error, mode),
                    url,
                    paint(message, Severity::Error, mode)
                )?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
