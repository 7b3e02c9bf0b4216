//! Human-readable text report.
//!
//! ```text
//! diff_prev=<previous>
//! diff_cur=<current>
//!
//! NEW_FAILURES 1
//! - db1 disk: OK -> CRIT reason=full
//!
//! RECOVERED 0
//!
//! STILL_BAD 0
//! ```
//!
//! The `changed` bucket is only available in the structured report.

use crate::config::Limits;
use crate::data::{DiffResult, EntityKey};

/// Render the text report.
///
/// Each section header carries the full count; listed entries are capped
/// by `limits`.
pub fn render_text(result: &DiffResult, previous: &str, current: &str, limits: &Limits) -> String {
    let mut out = String::new();

    out.push_str(&format!("diff_prev={}\n", previous));
    out.push_str(&format!("diff_cur={}\n", current));

    section(
        &mut out,
        "NEW_FAILURES",
        result.new_failures.len(),
        result
            .new_failures
            .iter()
            .take(limits.new_failures)
            .map(|t| entry_line(&t.key, &format!("{} -> {}", t.prev.brief(), t.cur.brief()))),
    );

    section(
        &mut out,
        "RECOVERED",
        result.recovered.len(),
        result
            .recovered
            .iter()
            .take(limits.recovered)
            .map(|t| entry_line(&t.key, &format!("{} -> {}", t.prev.brief(), t.cur.brief()))),
    );

    section(
        &mut out,
        "STILL_BAD",
        result.still_bad.len(),
        result
            .still_bad
            .iter()
            .take(limits.still_bad)
            .map(|s| entry_line(&s.key, &s.cur.brief())),
    );

    if let Some(missing) = &result.missing {
        section(
            &mut out,
            "MISSING",
            missing.len(),
            missing
                .iter()
                .take(limits.missing)
                .map(|m| entry_line(&m.key, &format!("{} -> (absent)", m.prev.brief()))),
        );
    }

    out
}

fn section(out: &mut String, title: &str, total: usize, lines: impl Iterator<Item = String>) {
    out.push('\n');
    out.push_str(&format!("{} {}\n", title, total));
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}

/// `- <host> <monitor>: <detail>`
fn entry_line(key: &EntityKey, detail: &str) -> String {
    format!("- {}: {}", key, detail)
}
