//! Command line entry point for the Bout Ledger
//!
//! Reads a JSON match log, runs the rating and aggregation passes and writes
//! the augmented log, the leaderboard and the statistics table next to each
//! other.

use anyhow::{Context, Result};
use bout_ledger::config::{validate_config, AppConfig};
use bout_ledger::ingest::Ingestor;
use bout_ledger::metrics::MetricsCollector;
use bout_ledger::pipeline::{run_pipeline, run_pipeline_concurrent};
use bout_ledger::report::{render_leaderboard, render_stats_table, RunReport, StatColumn};
use bout_ledger::types::RawMatch;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Bout Ledger - Elo ratings and fight statistics from a match log
#[derive(Parser)]
#[command(
    name = "bout-ledger",
    version,
    about = "Rates every participant of a chronological fight log and aggregates their statistics",
    long_about = "Bout Ledger consumes an ordered log of head-to-head matches, applies Elo \
                 updates match by match, sums the tracked per-fight counters for every \
                 participant and writes the augmented log, the leaderboard and the \
                 statistics table as JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Match log to rate
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON array of match rows in chronological order"
    )]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory receiving rated_matches.json, leaderboard.json and participant_stats.json"
    )]
    out_dir: PathBuf,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// K-factor override
    #[arg(long, value_name = "K", help = "Override the Elo K-factor")]
    k_factor: Option<f64>,

    /// Initial rating override
    #[arg(long, value_name = "RATING", help = "Override the initial rating")]
    initial_rating: Option<f64>,

    /// Reject logs whose event dates go backwards
    #[arg(long, help = "Reject the log if event dates are not non-decreasing")]
    validate_order: bool,

    /// Run the two engines concurrently
    #[arg(long, help = "Run rating and aggregation as concurrent passes")]
    concurrent: bool,

    /// Leaderboard rows to print
    #[arg(long, value_name = "N", default_value_t = 10)]
    top: usize,

    /// Statistics rows to print
    #[arg(
        long,
        value_name = "N",
        help = "Also print the top N rows of the statistics table"
    )]
    stats_top: Option<usize>,

    /// Column ranking the printed statistics table
    #[arg(
        long,
        value_name = "COLUMN",
        default_value = "wins",
        help = "matches, wins, losses, draws, no_contests or a tracked counter name"
    )]
    stats_by: StatColumn,

    /// Metrics dump path
    #[arg(
        long,
        value_name = "FILE",
        help = "Write Prometheus metrics for the run to this file"
    )]
    metrics_file: Option<PathBuf>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without reading the log")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        let mut config = AppConfig::from_file(config_path)?;
        config.apply_env()?;
        config
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }
    if let Some(initial_rating) = args.initial_rating {
        config.rating.initial_rating = initial_rating;
    }
    if args.validate_order {
        config.ingest.validate_order = true;
    }

    validate_config(&config)?;
    Ok(config)
}

fn display_run_settings(config: &AppConfig) {
    info!("Bout Ledger {}", bout_ledger::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Initial rating: {}", config.rating.initial_rating);
    info!("   K-factor: {}", config.rating.k_factor);
    info!(
        "   Tracked counters: {}",
        config.stats.tracked_counters.join(", ")
    );
    info!("   Order validation: {}", config.ingest.validate_order);
}

fn read_log(path: &Path) -> Result<Vec<RawMatch>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read match log {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse match log {}", path.display()))
}

fn write_reports(report: &RunReport, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let outputs = [
        ("rated_matches.json", report.rated_matches_json()?),
        ("leaderboard.json", report.leaderboard_json()?),
        ("participant_stats.json", report.stats_json()?),
    ];
    for (name, contents) in outputs {
        let path = out_dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

async fn run(args: &Args, config: &AppConfig, metrics: &MetricsCollector) -> Result<RunReport> {
    let input = args
        .input
        .as_deref()
        .context("--input is required unless --dry-run is given")?;

    let rows = read_log(input)?;
    let timer = metrics.start_timer();

    let records = match Ingestor::from_config(config)?.ingest(rows) {
        Ok(records) => records,
        Err(e) => {
            metrics.record_rejected_run();
            return Err(e);
        }
    };

    let report = if args.concurrent {
        run_pipeline_concurrent(records, config).await?
    } else {
        run_pipeline(&records, config)?
    };
    metrics.record_run(&report, timer.stop());

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_run_settings(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without reading the match log");
        return Ok(());
    }

    let metrics = MetricsCollector::new()?;
    let outcome = run(&args, &config, &metrics).await;

    if let Some(path) = &args.metrics_file {
        fs::write(path, metrics.render()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!("Run failed: {:#}", e);
            std::process::exit(1);
        }
    };

    write_reports(&report, &args.out_dir)?;
    print!("{}", render_leaderboard(report.top_rated(args.top)));
    if let Some(limit) = args.stats_top {
        let rows = report.top_by(&args.stats_by, limit);
        println!();
        print!("{}", render_stats_table(&rows, &report.tracked_counters));
    }

    info!(
        "Rated {} matches for {} participants",
        report.rated_matches.len(),
        report.leaderboard.len()
    );
    Ok(())
}
