use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use summary_diff::{
    diff_sources, DiffOptions, FileSource, Format, Report, Settings, SnapshotSource,
};

#[derive(Parser, Debug)]
#[command(name = "summary-diff")]
#[command(about = "Report what changed between two monitoring summary snapshots")]
struct Args {
    /// Summary from the previous run (a missing file is an empty snapshot)
    previous: PathBuf,

    /// Summary from the current run
    current: PathBuf,

    /// Emit the structured JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also report entities that stopped reporting since the previous run
    #[arg(long)]
    missing: bool,

    /// Settings file (TOML) with per-section display limits
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Anything after the two snapshots; only an exact `--json` has meaning
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

impl Args {
    fn format(&self) -> Format {
        if self.json || self.rest.first().is_some_and(|arg| arg == "--json") {
            Format::Json
        } else {
            Format::Text
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings::load(args.config.as_deref()).context("Failed to load settings")?;
    debug!(?settings, "loaded settings");

    let previous = FileSource::new(&args.previous);
    let current = FileSource::new(&args.current);
    let options = DiffOptions {
        track_missing: args.missing,
    };
    let result = diff_sources(&previous, &current, options)?;

    let format = args.format();
    let report = Report {
        result: &result,
        previous: previous.description(),
        current: current.description(),
    };
    let rendered = report.render(format, &settings.limits)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if format == Format::Json {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}

/// RUST_LOG overrides; otherwise warnings only, or debug with --verbose.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "summary_diff=debug"
        } else {
            "summary_diff=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
