//! Error types for loading snapshots and settings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing a diff report.
///
/// Malformed snapshot lines and missing snapshot files are not errors; they
/// are skipped or read as an empty snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot file exists but could not be read.
    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Settings could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    /// The structured report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = SnapshotError> = std::result::Result<T, E>;
