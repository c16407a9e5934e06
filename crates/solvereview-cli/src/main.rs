//! `solvereview` - collect solver results, compare them with a baseline and
//! write the review report.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use solvereview_benchmark::{Aggregator, BaselineComparator, ReportWriter};
use solvereview_config::{ConfigError, ReviewConfig};
use solvereview_core::{ReviewError, RunMode};
use thiserror::Error;
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "solvereview",
    about = "Review solver runs against a stored baseline",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Batch configuration (TOML, or YAML by extension)
    #[arg(short, long, default_value = "review.toml")]
    config: PathBuf,

    /// Run mode override: `solve` or `loadsolution`
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<RunMode>,

    /// Stop after writing the instance table and profile summary
    #[arg(long)]
    no_compare: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Review(#[from] ReviewError),
}

fn parse_mode(s: &str) -> Result<RunMode, String> {
    s.parse().map_err(|err: ReviewError| err.to_string())
}

fn load_config(path: &Path) -> Result<ReviewConfig, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => ReviewConfig::from_yaml_file(path),
        _ => ReviewConfig::load(path),
    }
}

fn configure(cli: &Cli) -> Result<ReviewConfig, CliError> {
    let wrap = |source| CliError::Config {
        path: cli.config.clone(),
        source,
    };

    let mut config = load_config(&cli.config).map_err(wrap)?;
    if let Some(mode) = cli.mode {
        config = config.with_solve_mode(mode);
    }
    config.validate().map_err(wrap)?;
    Ok(config)
}

/// Aggregates the configured batch and, when `compare` is set, writes the
/// report against the baseline of the batch's run mode.
fn execute(config: &ReviewConfig, compare: bool) -> Result<(), CliError> {
    let aggregation = Aggregator::from_config(config).aggregate(&config.instances)?;
    if !compare {
        return Ok(());
    }

    let (baseline, delta) =
        BaselineComparator::for_mode(config, config.solve_mode).compare(&aggregation.table)?;
    ReportWriter::new(&config.report).write(&baseline, &aggregation.table, &delta)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.quiet {
        solvereview_console::init_with("solvereview=warn", false);
    } else {
        solvereview_console::init();
    }

    match configure(&cli).and_then(|config| execute(&config, !cli.no_compare)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
