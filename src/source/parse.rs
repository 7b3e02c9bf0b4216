//! Line parser for summary snapshot files.

use super::record::StatusRecord;

/// Lines not starting with this prefix are not status records.
const RECORD_PREFIX: &str = "monitor=";

/// Parse a single line into a record.
///
/// Returns `None` for lines that are not records (blank lines, comments,
/// headers). Tokens without `=` are dropped; each remaining token is split
/// on its first `=`.
pub fn parse_line(line: &str) -> Option<StatusRecord> {
    if !line.starts_with(RECORD_PREFIX) {
        return None;
    }

    let pairs = line
        .split_whitespace()
        .filter_map(|token| token.split_once('='));

    Some(StatusRecord::from_pairs(pairs))
}

/// Parse a whole snapshot, keeping file order.
pub fn parse_records(text: &str) -> Vec<StatusRecord> {
    text.lines().filter_map(parse_line).collect()
}
