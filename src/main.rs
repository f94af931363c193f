//! aha-drc - Hardware Design Rule Checker
//!
//! Checks a hardware interconnect graph for power-budget and wiring problems
//! and prints a JSON report on stdout.
//!
//! # Usage
//!
//! ```bash
//! aha-drc design.json
//! cat design.json | aha-drc - --pretty --breakdown
//! RUST_LOG=aha_drc=debug aha-drc design.json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use aha_drc::{
    drc::{DEFAULT_DATA_MARKER, DEFAULT_HIGH_POWER_THRESHOLD_W, DEFAULT_POWER_MARKER, DEFAULT_TOP_CONSUMER_COUNT},
    error::{DrcError, Result},
    DrcConfig, DrcEngine,
};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Hardware design rule checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the graph document (.json), or '-' for stdin
    #[arg(value_name = "GRAPH_FILE")]
    graph_file: PathBuf,

    /// Substring marking a power handle
    #[arg(long, default_value = DEFAULT_POWER_MARKER)]
    power_marker: String,

    /// Substring marking a data handle
    #[arg(long, default_value = DEFAULT_DATA_MARKER)]
    data_marker: String,

    /// Include a per-category power breakdown in the report
    #[arg(long)]
    breakdown: bool,

    /// Power (W) at or above which a node counts as high-power
    #[arg(long, default_value_t = DEFAULT_HIGH_POWER_THRESHOLD_W)]
    high_power_threshold: f64,

    /// Number of top power consumers to list
    #[arg(long, default_value_t = DEFAULT_TOP_CONSUMER_COUNT)]
    top_consumers: usize,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Log rule evaluation to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = DrcConfig::new()
        .with_power_marker(args.power_marker)
        .with_data_marker(args.data_marker)
        .with_power_breakdown(args.breakdown)
        .with_high_power_threshold(args.high_power_threshold)
        .with_top_consumer_count(args.top_consumers);
    let engine = DrcEngine::new(config);

    // A load failure still produces a report, so this never errors out
    let report = if args.graph_file.as_os_str() == "-" {
        engine.check_reader(io::stdin().lock())
    } else {
        engine.check_file(&args.graph_file)
    };

    let json = report.to_json(args.pretty)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
        .and_then(|_| stdout.flush())
        .map_err(|e| DrcError::output(e.to_string()))?;

    Ok(())
}

/// Log to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
