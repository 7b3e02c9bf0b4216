//! Report settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment variables.
//!
//! ```toml
//! [limits]
//! new_failures = 80
//! recovered = 80
//! still_bad = 120
//! missing = 80
//! ```
//!
//! Environment overrides use the `SUMMARY_DIFF` prefix with `__` between
//! levels, e.g. `SUMMARY_DIFF_LIMITS__STILL_BAD=50`.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "SUMMARY_DIFF";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub limits: Limits,
}

/// Maximum entries listed per section of the text report.
///
/// Section counts always report the full total.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub new_failures: usize,
    pub recovered: usize,
    pub still_bad: usize,
    pub missing: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            new_failures: 80,
            recovered: 80,
            still_bad: 120,
            missing: 80,
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    ///
    /// A file given explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
