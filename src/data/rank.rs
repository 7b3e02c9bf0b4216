//! Ordering of report sections.
//!
//! Failure sections list the worst status first, then by entity key.
//! Recoveries are listed by entity key only.

use std::cmp::Ordering;

use super::snapshot::EntityKey;
use crate::source::StatusRecord;

/// An entry that belongs to a single entity.
pub trait Keyed {
    fn key(&self) -> &EntityKey;
}

/// An entry with a current record to rank by.
pub trait Ranked: Keyed {
    fn current(&self) -> &StatusRecord;
}

/// Sort by descending severity of the current status, then ascending key.
pub fn rank_by_severity<T: Ranked>(entries: &mut [T]) {
    entries.sort_by(|a, b| severity_order(a, b).then_with(|| a.key().cmp(b.key())));
}

/// Sort by ascending `(monitor, host)`.
pub fn rank_by_key<T: Keyed>(entries: &mut [T]) {
    entries.sort_by(|a, b| a.key().cmp(b.key()));
}

fn severity_order<T: Ranked>(a: &T, b: &T) -> Ordering {
    let a = a.current().status().severity();
    let b = b.current().status().severity();
    b.cmp(&a)
}
