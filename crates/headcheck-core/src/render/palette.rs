//! Severity colors.

use colored::Colorize;

use crate::config::ColorMode;
use crate::registry::Severity;

/// Colors `text` for `severity`. The light palette draws warnings in magenta
/// instead of yellow; `ColorMode::None` returns the text unchanged.
pub(crate) fn paint(text: &str, severity: Severity, mode: ColorMode) -> String {
    let painted = match (severity, mode) {
        (_, ColorMode::None) => return text.to_string(),
        (Severity::Error, _) => text.bright_red(),
        (Severity::Warn, ColorMode::Light) => text.bright_magenta(),
        (Severity::Warn, _) => text.bright_yellow(),
        (Severity::Success, _) => text.bright_green(),
        (Severity::Info, _) => text.bright_blue(),
    };
    painted.to_string()
}
