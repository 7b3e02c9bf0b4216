//! # summary-diff
//!
//! Change detection between two snapshots of monitoring check results.
//!
//! Check runners (inode, network, service, certificate, user, backup, ...)
//! write one `monitor=<check> host=<host> status=<STATUS> ...` line per
//! result. Given the summaries of two runs, this crate reports what changed:
//! which entities newly failed, which recovered, which are still bad, and
//! which moved between two non-OK states.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌───────────┐    ┌──────────┐
//! │  source  │───▶│     data     │───▶│   data    │───▶│  render  │
//! │ (parse)  │    │  (Snapshot)  │    │  (diff)   │    │ text/json│
//! └──────────┘    └──────────────┘    └───────────┘    └──────────┘
//! ```
//!
//! - **[`source`]**: Status records, the line parser, and the
//!   [`SnapshotSource`] trait with file and in-memory implementations
//! - **[`data`]**: Entity-keyed snapshots, the change classifier and section ranking
//! - **[`render`]**: Structured and text reports
//! - **[`config`]**: Layered report settings
//!
//! ## Example
//!
//! ```
//! use summary_diff::{diff_sources, DiffOptions, MemorySource};
//!
//! let prev = MemorySource::new("monitor=disk host=db1 status=OK\n", "prev");
//! let cur = MemorySource::new("monitor=disk host=db1 status=CRIT reason=full\n", "cur");
//!
//! let result = diff_sources(&prev, &cur, DiffOptions::default()).unwrap();
//! assert_eq!(result.new_failures.len(), 1);
//! assert_eq!(result.new_failures[0].cur.reason(), Some("full"));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod source;

pub use config::{Limits, Settings};
pub use data::{
    diff, Change, DiffCounts, DiffOptions, DiffResult, EntityKey, Missing, Snapshot, StillBad,
    Transition,
};
pub use error::{Result, SnapshotError};
pub use render::{render_json, render_text, Format, Report};
pub use source::{FileSource, MemorySource, SnapshotSource, Status, StatusRecord};

/// Load both snapshots and classify the differences.
pub fn diff_sources(
    previous: &dyn SnapshotSource,
    current: &dyn SnapshotSource,
    options: DiffOptions,
) -> Result<DiffResult> {
    let previous = Snapshot::load(previous)?;
    let current = Snapshot::load(current)?;
    Ok(diff(&previous, &current, options))
}
