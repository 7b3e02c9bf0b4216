//! Status records as written by the check runners.
//!
//! A record is the parsed form of one `monitor=... host=... status=...`
//! line. Only `monitor`, `host`, `status` and `reason` have meaning here;
//! every other attribute is carried along untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Status label reported by a check.
///
/// Labels are matched exactly; anything outside the known set is kept
/// verbatim in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Warn,
    Crit,
    Unknown,
    Skip,
    Other(String),
}

impl Status {
    /// Parse a status token. Never fails.
    pub fn parse(token: &str) -> Self {
        match token {
            "OK" => Status::Ok,
            "WARN" => Status::Warn,
            "CRIT" => Status::Crit,
            "UNKNOWN" => Status::Unknown,
            "SKIP" => Status::Skip,
            other => Status::Other(other.to_string()),
        }
    }

    /// Returns the label as it appears in snapshot files.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::Warn => "WARN",
            Status::Crit => "CRIT",
            Status::Unknown => "UNKNOWN",
            Status::Skip => "SKIP",
            Status::Other(label) => label,
        }
    }

    /// Sort rank used when ordering report sections (higher is worse).
    ///
    /// Unrecognized labels rank with `UNKNOWN`, never with `OK`.
    pub fn severity(&self) -> u8 {
        match self {
            Status::Ok | Status::Skip => 0,
            Status::Warn => 1,
            Status::Crit => 2,
            Status::Unknown | Status::Other(_) => 3,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// `WARN`, `CRIT` or `UNKNOWN`: the statuses that count as a failure
    /// when entering or leaving `OK`.
    pub fn is_failing(&self) -> bool {
        matches!(self, Status::Warn | Status::Crit | Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One check result from a snapshot.
///
/// Backed by the full attribute map of the source line. Serializes as that
/// map (keys sorted), so nothing is lost on the way to structured output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusRecord {
    fields: BTreeMap<String, String>,
}

impl StatusRecord {
    /// Build a record from already-split attributes.
    ///
    /// When a key repeats, the first value is kept.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = BTreeMap::new();
        for (key, value) in pairs {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { fields }
    }

    pub fn monitor(&self) -> &str {
        self.get("monitor").unwrap_or_default()
    }

    pub fn host(&self) -> &str {
        self.get("host").unwrap_or_default()
    }

    /// The record's status; a record without one is `UNKNOWN`.
    pub fn status(&self) -> Status {
        self.raw_status().map_or(Status::Unknown, Status::parse)
    }

    /// The literal `status` attribute, if present.
    pub fn raw_status(&self) -> Option<&str> {
        self.get("status")
    }

    /// The `reason` attribute, if present and non-empty.
    pub fn reason(&self) -> Option<&str> {
        self.get("reason").filter(|r| !r.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// All attributes, sorted by key.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Short form used in text reports: `<status>[ reason=<reason>]`.
    ///
    /// A record with no status attribute shows `?`.
    pub fn brief(&self) -> String {
        let status = self.raw_status().unwrap_or("?");
        match self.reason() {
            Some(reason) => format!("{} reason={}", status, reason),
            None => status.to_string(),
        }
    }
}
