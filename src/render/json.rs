//! Structured (JSON) report.

use serde_json::{json, Map, Value};

use crate::data::{Change, DiffResult, Missing, StillBad, Transition};
use crate::error::Result;

/// Build the structured payload.
///
/// Records are passed through with all of their attributes. Object keys are
/// sorted at every level.
pub fn to_value(result: &DiffResult) -> Value {
    let mut out = Map::new();

    out.insert(
        "new_failures".to_string(),
        result.new_failures.iter().map(transition).collect(),
    );
    out.insert(
        "recovered".to_string(),
        result.recovered.iter().map(transition).collect(),
    );
    out.insert(
        "still_bad".to_string(),
        result.still_bad.iter().map(still_bad).collect(),
    );
    out.insert(
        "changed".to_string(),
        result.changed.iter().map(change).collect(),
    );
    if let Some(missing) = &result.missing {
        out.insert(
            "missing".to_string(),
            missing.iter().map(disappeared).collect(),
        );
    }

    Value::Object(out)
}

/// Render the structured payload as pretty-printed JSON.
pub fn render_json(result: &DiffResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(result))?)
}

fn transition(entry: &Transition) -> Value {
    json!({
        "monitor": entry.key.monitor,
        "host": entry.key.host,
        "prev": entry.prev,
        "cur": entry.cur,
    })
}

fn still_bad(entry: &StillBad) -> Value {
    json!({
        "monitor": entry.key.monitor,
        "host": entry.key.host,
        "cur": entry.cur,
    })
}

fn change(entry: &Change) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), json!(entry.kind()));
    obj.insert("key".to_string(), json!(entry.key()));
    if let Some(prev) = entry.prev() {
        obj.insert("prev".to_string(), json!(prev));
    }
    obj.insert("cur".to_string(), json!(entry.cur()));
    Value::Object(obj)
}

fn disappeared(entry: &Missing) -> Value {
    json!({
        "monitor": entry.key.monitor,
        "host": entry.key.host,
        "prev": entry.prev,
    })
}
