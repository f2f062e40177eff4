//! astican CLI - Shipyard Berth & Hardstand Assignment Optimizer
//!
//! Reads a job file and a solver-parameter defaults file, solves the
//! berth/street assignment MILP, and reports the result.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "astican")]
#[command(author, version, about = "Shipyard berth & hardstand assignment optimizer", long_about = None)]
struct Cli {
    /// Job file: projects, periods, locations, and parameter overrides
    #[arg(value_name = "JOB")]
    job: PathBuf,

    /// Solver-parameter defaults file
    #[arg(value_name = "DEFAULTS")]
    defaults: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Solver time budget, in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let job = astican_ingest::load_job(&cli.job).with_context(|| format!("failed to load job file '{}'", cli.job.display()))?;
    let defaults = astican_ingest::load_defaults(&cli.defaults)
        .with_context(|| format!("failed to load defaults file '{}'", cli.defaults.display()))?;
    let ingested = astican_ingest::ingest(job, defaults).context("failed to ingest job data")?;

    let output = astican_solver::pipeline::run_with_pumpkin(ingested, Duration::from_secs(cli.timeout_secs))
        .context("solver did not produce an optimal assignment")?;

    let rendered = match cli.format.as_str() {
        "json" => report::render_json(&output).context("failed to render JSON report")?,
        _ => report::render_text(&output),
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered).with_context(|| format!("failed to write output file '{}'", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}
