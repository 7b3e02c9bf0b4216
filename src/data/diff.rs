//! Classification of entity state changes between two snapshots.

use tracing::debug;

use super::rank::{rank_by_key, rank_by_severity, Keyed, Ranked};
use super::snapshot::{EntityKey, Snapshot};
use crate::source::StatusRecord;

/// Options for [`diff`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Also report entities present in the previous snapshot but absent
    /// from the current one, in a separate [`DiffResult::missing`] list.
    pub track_missing: bool,
}

/// An entity whose status moved into or out of `OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub key: EntityKey,
    pub prev: StatusRecord,
    pub cur: StatusRecord,
}

/// An entity that is non-OK with the same status in both snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillBad {
    pub key: EntityKey,
    pub cur: StatusRecord,
}

/// Any other change worth surfacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// An entity seen for the first time, already non-OK.
    New { key: EntityKey, cur: StatusRecord },
    /// A change between statuses that is not a plain failure or recovery,
    /// e.g. `WARN -> CRIT` or anything involving `SKIP`.
    Transition {
        key: EntityKey,
        prev: StatusRecord,
        cur: StatusRecord,
    },
}

impl Change {
    pub fn key(&self) -> &EntityKey {
        match self {
            Change::New { key, .. } | Change::Transition { key, .. } => key,
        }
    }

    pub fn prev(&self) -> Option<&StatusRecord> {
        match self {
            Change::New { .. } => None,
            Change::Transition { prev, .. } => Some(prev),
        }
    }

    pub fn cur(&self) -> &StatusRecord {
        match self {
            Change::New { cur, .. } | Change::Transition { cur, .. } => cur,
        }
    }

    /// The `type` tag used in structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::New { .. } => "new",
            Change::Transition { .. } => "transition",
        }
    }
}

/// An entity that stopped reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    pub key: EntityKey,
    pub prev: StatusRecord,
}

impl Keyed for Transition {
    fn key(&self) -> &EntityKey {
        &self.key
    }
}

impl Ranked for Transition {
    fn current(&self) -> &StatusRecord {
        &self.cur
    }
}

impl Keyed for StillBad {
    fn key(&self) -> &EntityKey {
        &self.key
    }
}

impl Ranked for StillBad {
    fn current(&self) -> &StatusRecord {
        &self.cur
    }
}

impl Keyed for Missing {
    fn key(&self) -> &EntityKey {
        &self.key
    }
}

/// Classified, ranked differences between two snapshots.
///
/// Each entity of the current snapshot lands in at most one bucket.
/// Entities that are `OK` in both snapshots, or new and `OK`, are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// `OK` -> `WARN`/`CRIT`/`UNKNOWN`, worst first.
    pub new_failures: Vec<Transition>,
    /// `WARN`/`CRIT`/`UNKNOWN` -> `OK`, by key.
    pub recovered: Vec<Transition>,
    /// Same non-OK status in both snapshots, worst first.
    pub still_bad: Vec<StillBad>,
    /// New non-OK entities and other transitions, in current snapshot order.
    pub changed: Vec<Change>,
    /// Entities that disappeared, by key. `None` unless tracking was requested.
    pub missing: Option<Vec<Missing>>,
}

/// Number of entries per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub new_failures: usize,
    pub recovered: usize,
    pub still_bad: usize,
    pub changed: usize,
    pub missing: Option<usize>,
}

impl DiffResult {
    pub fn counts(&self) -> DiffCounts {
        DiffCounts {
            new_failures: self.new_failures.len(),
            recovered: self.recovered.len(),
            still_bad: self.still_bad.len(),
            changed: self.changed.len(),
            missing: self.missing.as_ref().map(Vec::len),
        }
    }

    /// True when nothing worth reporting was found.
    pub fn is_empty(&self) -> bool {
        self.new_failures.is_empty()
            && self.recovered.is_empty()
            && self.still_bad.is_empty()
            && self.changed.is_empty()
            && self.missing.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Compare two snapshots.
///
/// Only entities present in `current` are classified. `changed` keeps the
/// current snapshot's first-appearance order; the other buckets are ranked.
pub fn diff(previous: &Snapshot, current: &Snapshot, options: DiffOptions) -> DiffResult {
    let mut result = DiffResult::default();

    for (key, cur) in current.iter() {
        let cur_status = cur.status();

        let Some(prev) = previous.get(key) else {
            if !cur_status.is_ok() {
                result.changed.push(Change::New {
                    key: key.clone(),
                    cur: cur.clone(),
                });
            }
            continue;
        };

        let prev_status = prev.status();
        if prev_status == cur_status {
            if !cur_status.is_ok() {
                result.still_bad.push(StillBad {
                    key: key.clone(),
                    cur: cur.clone(),
                });
            }
            continue;
        }

        let transition = Transition {
            key: key.clone(),
            prev: prev.clone(),
            cur: cur.clone(),
        };
        if prev_status.is_ok() && cur_status.is_failing() {
            result.new_failures.push(transition);
        } else if prev_status.is_failing() && cur_status.is_ok() {
            result.recovered.push(transition);
        } else {
            result.changed.push(Change::Transition {
                key: transition.key,
                prev: transition.prev,
                cur: transition.cur,
            });
        }
    }

    if options.track_missing {
        let mut missing: Vec<Missing> = previous
            .iter()
            .filter(|(key, _)| current.get(key).is_none())
            .map(|(key, prev)| Missing {
                key: key.clone(),
                prev: prev.clone(),
            })
            .collect();
        rank_by_key(&mut missing);
        result.missing = Some(missing);
    }

    rank_by_severity(&mut result.new_failures);
    rank_by_severity(&mut result.still_bad);
    rank_by_key(&mut result.recovered);

    debug!(counts = ?result.counts(), "classified snapshot diff");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{parse_records, Status};

    fn snapshot(text: &str) -> Snapshot {
        Snapshot::from_records(parse_records(text))
    }

    fn run(prev: &str, cur: &str) -> DiffResult {
        diff(&snapshot(prev), &snapshot(cur), DiffOptions::default())
    }

    #[test]
    fn test_ok_to_crit_is_new_failure() {
        let result = run(
            "monitor=disk host=db1 status=OK\n",
            "monitor=disk host=db1 status=CRIT reason=full\n",
        );
        assert_eq!(result.new_failures.len(), 1);
        let entry = &result.new_failures[0];
        assert_eq!(entry.key, EntityKey::new("disk", "db1"));
        assert_eq!(entry.prev.status(), Status::Ok);
        assert_eq!(entry.cur.status(), Status::Crit);
        assert_eq!(entry.cur.reason(), Some("full"));
        assert!(result.recovered.is_empty());
        assert!(result.still_bad.is_empty());
        assert!(result.changed.is_empty());
    }

    #[test]
    fn test_warn_to_ok_is_recovered() {
        let result = run(
            "monitor=svc host=web1 status=WARN\n",
            "monitor=svc host=web1 status=OK\n",
        );
        assert_eq!(result.recovered.len(), 1);
        assert_eq!(result.recovered[0].key, EntityKey::new("svc", "web1"));
        assert!(result.new_failures.is_empty());
    }

    #[test]
    fn test_missing_status_counts_as_unknown() {
        let result = run("monitor=svc host=web1 status=OK\n", "monitor=svc host=web1\n");
        assert_eq!(result.new_failures.len(), 1);

        let result = run(
            "monitor=svc host=web1 status=UNKNOWN\n",
            "monitor=svc host=web1\n",
        );
        assert_eq!(result.still_bad.len(), 1);
    }

    #[test]
    fn test_non_ok_transitions_are_changes() {
        let result = run(
            "monitor=a host=h status=WARN\n\
             monitor=b host=h status=OK\n\
             monitor=c host=h status=SKIP\n\
             monitor=d host=h status=UNKNOWN\n\
             monitor=e host=h status=OK\n",
            "monitor=a host=h status=CRIT\n\
             monitor=b host=h status=SKIP\n\
             monitor=c host=h status=OK\n\
             monitor=d host=h status=WARN\n\
             monitor=e host=h status=ERROR\n",
        );
        assert!(result.new_failures.is_empty());
        assert!(result.recovered.is_empty());
        assert!(result.still_bad.is_empty());

        let monitors: Vec<_> = result.changed.iter().map(|c| c.key().monitor.as_str()).collect();
        assert_eq!(monitors, vec!["a", "b", "c", "d", "e"]);
        assert!(result.changed.iter().all(|c| c.kind() == "transition"));
        assert_eq!(result.changed[0].prev().unwrap().status(), Status::Warn);
        assert_eq!(result.changed[0].cur().status(), Status::Crit);
    }

    #[test]
    fn test_new_entities() {
        let result = run(
            "",
            "monitor=cert host=web1 status=WARN reason=expiring\n\
             monitor=svc host=web1 status=OK\n",
        );
        assert_eq!(result.changed.len(), 1);
        let change = &result.changed[0];
        assert_eq!(change.kind(), "new");
        assert!(change.prev().is_none());
        assert_eq!(change.cur().reason(), Some("expiring"));
    }

    #[test]
    fn test_unchanged_non_ok_is_still_bad() {
        let result = run(
            "monitor=a host=h status=CRIT\n\
             monitor=b host=h status=SKIP\n\
             monitor=c host=h status=OK\n",
            "monitor=a host=h status=CRIT\n\
             monitor=b host=h status=SKIP\n\
             monitor=c host=h status=OK\n",
        );
        let monitors: Vec<_> = result.still_bad.iter().map(|s| s.key.monitor.as_str()).collect();
        assert_eq!(monitors, vec!["a", "b"]);
        assert!(result.changed.is_empty());
    }

    #[test]
    fn test_still_bad_ranked_crit_before_warn() {
        let text = "monitor=svc host=web2 status=WARN\n\
                    monitor=svc host=web1 status=CRIT\n\
                    monitor=disk host=db1 status=CRIT\n";
        let result = run(text, text);
        let keys: Vec<_> = result
            .still_bad
            .iter()
            .map(|s| (s.key.monitor.as_str(), s.key.host.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("disk", "db1"), ("svc", "web1"), ("svc", "web2")]
        );
    }

    #[test]
    fn test_still_bad_skip_ranks_below_warn() {
        let text = "monitor=a host=h status=SKIP\n\
                    monitor=z host=h status=WARN\n";
        let result = run(text, text);
        let monitors: Vec<_> = result.still_bad.iter().map(|s| s.key.monitor.as_str()).collect();
        assert_eq!(monitors, vec!["z", "a"]);
    }

    #[test]
    fn test_changed_keeps_current_order() {
        let result = run(
            "monitor=a host=h status=WARN\n",
            "monitor=z host=h status=CRIT\n\
             monitor=a host=h status=CRIT\n\
             monitor=m host=h status=UNKNOWN\n",
        );
        let monitors: Vec<_> = result.changed.iter().map(|c| c.key().monitor.as_str()).collect();
        assert_eq!(monitors, vec!["z", "a", "m"]);
        assert_eq!(result.changed[1].kind(), "transition");
    }

    #[test]
    fn test_recovered_sorted_by_key() {
        let result = run(
            "monitor=svc host=b status=CRIT\n\
             monitor=disk host=a status=WARN\n\
             monitor=svc host=a status=UNKNOWN\n",
            "monitor=svc host=b status=OK\n\
             monitor=disk host=a status=OK\n\
             monitor=svc host=a status=OK\n",
        );
        let keys: Vec<_> = result.recovered.iter().map(|t| t.key.to_string()).collect();
        assert_eq!(keys, vec!["a disk", "a svc", "b svc"]);
    }

    #[test]
    fn test_disappeared_entities_ignored_by_default() {
        let result = run("monitor=disk host=db1 status=CRIT\n", "");
        assert!(result.is_empty());
        assert!(result.missing.is_none());
    }

    #[test]
    fn test_track_missing() {
        let prev = snapshot(
            "monitor=svc host=web1 status=OK\n\
             monitor=disk host=db1 status=CRIT\n\
             monitor=net host=gw status=OK\n",
        );
        let cur = snapshot("monitor=net host=gw status=OK\n");
        let result = diff(&prev, &cur, DiffOptions { track_missing: true });

        let missing = result.missing.as_ref().unwrap();
        let keys: Vec<_> = missing.iter().map(|m| m.key.monitor.as_str()).collect();
        assert_eq!(keys, vec!["disk", "svc"]);
        assert_eq!(missing[0].prev.status(), Status::Crit);

        assert!(result.new_failures.is_empty());
        assert!(result.recovered.is_empty());
        assert!(result.still_bad.is_empty());
        assert!(result.changed.is_empty());
        assert_eq!(result.counts().missing, Some(2));
    }

    #[test]
    fn test_counts() {
        let result = run(
            "monitor=a host=h status=OK\nmonitor=b host=h status=WARN\n",
            "monitor=a host=h status=WARN\nmonitor=b host=h status=WARN\nmonitor=c host=h status=CRIT\n",
        );
        assert_eq!(
            result.counts(),
            DiffCounts {
                new_failures: 1,
                recovered: 0,
                still_bad: 1,
                changed: 1,
                missing: None,
            }
        );
        assert!(!result.is_empty());
    }
}
