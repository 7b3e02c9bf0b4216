//! File-based snapshot source.
//!
//! Reads a summary file written by the check runners.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::parse::parse_records;
use super::{SnapshotSource, StatusRecord};
use crate::error::{Result, SnapshotError};

/// A snapshot source backed by a summary file on disk.
///
/// A file that does not exist reads as an empty snapshot, so a first run
/// with no previous summary still produces a report. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = path.display().to_string();
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn read_records(&self) -> Result<Vec<StatusRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "snapshot file not found, using empty snapshot");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(SnapshotError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records = parse_records(&String::from_utf8_lossy(&bytes));
        debug!(path = %self.path.display(), records = records.len(), "loaded snapshot");
        Ok(records)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
