//! Report rendering.
//!
//! Two views of the same [`DiffResult`]: a structured JSON payload for
//! machines and a capped text summary for operators.

mod json;
mod text;

pub use json::{render_json, to_value};
pub use text::render_text;

use crate::config::Limits;
use crate::data::DiffResult;
use crate::error::Result;

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Human-readable summary.
    #[default]
    Text,
    /// Structured JSON payload.
    Json,
}

/// A diff result together with the identifiers of its two inputs.
#[derive(Debug)]
pub struct Report<'a> {
    pub result: &'a DiffResult,
    pub previous: &'a str,
    pub current: &'a str,
}

impl Report<'_> {
    /// Render in the requested format.
    pub fn render(&self, format: Format, limits: &Limits) -> Result<String> {
        match format {
            Format::Text => Ok(render_text(
                self.result,
                self.previous,
                self.current,
                limits,
            )),
            Format::Json => render_json(self.result),
        }
    }
}
