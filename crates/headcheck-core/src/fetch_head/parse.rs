//! Parse raw HTTP response header lines into a HeaderMap.

use crate::header_map::HeaderMap;

/// Parse collected header lines, keeping only the last response block.
///
/// libcurl reports headers of every response it sees (interim `100 Continue`,
/// each redirect hop); each block starts with an `HTTP/` status line.
pub(crate) fn parse_final_block(lines: &[String]) -> HeaderMap {
    let start = lines
        .iter()
        .rposition(|l| l.starts_with("HTTP/"))
        .map_or(0, |i| i + 1);

    let mut headers = HeaderMap::new();
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.insert(name, value.trim());
        }
    }
    headers
}
