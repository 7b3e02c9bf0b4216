//! Snapshot input: status records and where they come from.
//!
//! A snapshot is the text output of one monitoring run, one record per
//! `monitor=...` line. This module provides the record types, the line
//! parser, and a trait-based abstraction over the places a snapshot can be
//! read from.

mod file;
mod parse;
mod record;

pub use file::FileSource;
pub use parse::{parse_line, parse_records};
pub use record::{Status, StatusRecord};

use std::fmt::Debug;

use crate::error::Result;

/// Trait for reading the records of one snapshot.
///
/// # Example
///
/// ```
/// use summary_diff::{FileSource, SnapshotSource};
///
/// let source = FileSource::new("summary.txt");
/// let records = source.read_records().unwrap();
/// println!("{}: {} records", source.description(), records.len());
/// ```
pub trait SnapshotSource: Debug {
    /// Read all records, in source order.
    ///
    /// Unparseable lines are skipped. A source that does not exist yields
    /// no records.
    fn read_records(&self) -> Result<Vec<StatusRecord>>;

    /// Returns the identifier shown in report headers.
    fn description(&self) -> &str;
}

/// A snapshot held in memory, e.g. captured from a check runner's stdout.
#[derive(Debug, Clone)]
pub struct MemorySource {
    text: String,
    description: String,
}

impl MemorySource {
    /// Create a source over the given summary text.
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

impl SnapshotSource for MemorySource {
    fn read_records(&self) -> Result<Vec<StatusRecord>> {
        Ok(parse_records(&self.text))
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new(
            "monitor=user host=bastion status=WARN reason=expired\n",
            "stdin",
        );
        let records = source.read_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reason(), Some("expired"));
        assert_eq!(source.description(), "stdin");
    }
}
