//! Target lists read from a file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One target per line. Surrounding whitespace is trimmed; blank lines and
/// lines starting with `#` are skipped.
pub fn parse_targets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read target list {}", path.display()))?;
    let targets = parse_targets(&text);
    tracing::debug!(path = %path.display(), count = targets.len(), "loaded targets");
    Ok(targets)
}
