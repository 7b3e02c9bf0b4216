//! Snapshot indexing and change classification.
//!
//! This module turns parsed status records into comparable snapshots and
//! classifies what changed between two of them.
//!
//! ## Submodules
//!
//! - [`snapshot`]: Entity keys and the per-run index ([`Snapshot`], [`EntityKey`])
//! - [`diff`]: Bucketing of entity changes ([`diff()`], [`DiffResult`])
//! - [`rank`]: Severity and key ordering of the report sections
//!
//! ## Data Flow
//!
//! ```text
//! Vec<StatusRecord> (previous)     Vec<StatusRecord> (current)
//!        │                                 │
//!        ▼                                 ▼
//! Snapshot::from_records()         Snapshot::from_records()
//!        │                                 │
//!        └──────────────┬──────────────────┘
//!                       ▼
//!                    diff()
//!                       │
//!                       ├──▶ new_failures / still_bad (ranked by severity)
//!                       ├──▶ recovered (ranked by key)
//!                       └──▶ changed (current snapshot order)
//! ```

pub mod diff;
pub mod rank;
pub mod snapshot;

pub use diff::{diff, Change, DiffCounts, DiffOptions, DiffResult, Missing, StillBad, Transition};
pub use snapshot::{EntityKey, Snapshot};
