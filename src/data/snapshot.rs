//! Snapshots indexed by monitored entity.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::source::{SnapshotSource, StatusRecord};

/// Identifies a monitored entity: a check type on a host.
///
/// Compared by exact string match on both fields. Orders by `monitor`,
/// then `host`. Serializes as `[monitor, host]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct EntityKey {
    pub monitor: String,
    pub host: String,
}

impl EntityKey {
    pub fn new(monitor: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            monitor: monitor.into(),
            host: host.into(),
        }
    }

    /// The key a record is indexed under.
    pub fn of(record: &StatusRecord) -> Self {
        Self::new(record.monitor(), record.host())
    }
}

impl From<(String, String)> for EntityKey {
    fn from((monitor, host): (String, String)) -> Self {
        Self { monitor, host }
    }
}

impl From<EntityKey> for (String, String) {
    fn from(key: EntityKey) -> Self {
        (key.monitor, key.host)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.host, self.monitor)
    }
}

/// All records of one monitoring run, indexed by entity.
///
/// Iteration follows the order in which each entity first appeared; the
/// record returned for an entity is the last one seen for it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<StatusRecord>,
    order: Vec<EntityKey>,
    latest: HashMap<EntityKey, usize>,
}

impl Snapshot {
    /// A snapshot with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index records given in source order.
    pub fn from_records(records: Vec<StatusRecord>) -> Self {
        let mut order = Vec::new();
        let mut latest = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            let key = EntityKey::of(record);
            if latest.insert(key.clone(), idx).is_none() {
                order.push(key);
            }
        }

        Self {
            records,
            order,
            latest,
        }
    }

    /// Read and index a snapshot from a source.
    pub fn load(source: &dyn SnapshotSource) -> Result<Self> {
        let snapshot = Self::from_records(source.read_records()?);
        debug!(
            source = source.description(),
            records = snapshot.records.len(),
            entities = snapshot.len(),
            "indexed snapshot"
        );
        Ok(snapshot)
    }

    /// The latest record for an entity.
    pub fn get(&self, key: &EntityKey) -> Option<&StatusRecord> {
        self.latest.get(key).map(|&idx| &self.records[idx])
    }

    /// Entities in first-appearance order, with their latest record.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &StatusRecord)> + '_ {
        self.order
            .iter()
            .map(move |key| (key, &self.records[self.latest[key]]))
    }

    /// Every parsed record, duplicates included, in source order.
    pub fn records(&self) -> &[StatusRecord] {
        &self.records
    }

    /// Number of distinct entities.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities whose latest status is not `OK`.
    pub fn non_ok(&self) -> impl Iterator<Item = (&EntityKey, &StatusRecord)> + '_ {
        self.iter().filter(|(_, record)| !record.status().is_ok())
    }
}
