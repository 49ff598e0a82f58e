//! Metrics collection using Prometheus
//!
//! Counts what a batch run did so it can be scraped or dumped next to the
//! reports.

use crate::report::RunReport;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for ledger runs
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Matches consumed, labelled by engine
    pub matches_processed_total: IntCounterVec,

    /// Counter values read as zero, labelled by kind (placeholder, malformed)
    pub counters_normalized_total: IntCounterVec,

    /// Runs rejected before any engine ran
    pub rejected_runs_total: IntCounter,

    /// Participants in the latest run
    pub participants: IntGauge,

    /// Wall time of a full pipeline run
    pub run_duration_seconds: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let matches_processed_total = IntCounterVec::new(
            Opts::new(
                "bout_ledger_matches_processed_total",
                "Matches consumed by each engine",
            ),
            &["engine"],
        )?;
        registry.register(Box::new(matches_processed_total.clone()))?;

        let counters_normalized_total = IntCounterVec::new(
            Opts::new(
                "bout_ledger_counters_normalized_total",
                "Counter values normalized to zero",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(counters_normalized_total.clone()))?;

        let rejected_runs_total = IntCounter::new(
            "bout_ledger_rejected_runs_total",
            "Match logs rejected at ingestion",
        )?;
        registry.register(Box::new(rejected_runs_total.clone()))?;

        let participants = IntGauge::new(
            "bout_ledger_participants",
            "Participants seen in the latest run",
        )?;
        registry.register(Box::new(participants.clone()))?;

        let run_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "bout_ledger_run_duration_seconds",
            "Time spent rating and aggregating a match log",
        ))?;
        registry.register(Box::new(run_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            matches_processed_total,
            counters_normalized_total,
            rejected_runs_total,
            participants,
            run_duration_seconds,
        })
    }

    /// Record a completed run
    pub fn record_run(&self, report: &RunReport, duration: Duration) {
        let matches = report.rated_matches.len() as u64;
        self.matches_processed_total
            .with_label_values(&["rating"])
            .inc_by(matches);
        self.matches_processed_total
            .with_label_values(&["stats"])
            .inc_by(matches);

        self.counters_normalized_total
            .with_label_values(&["placeholder"])
            .inc_by(report.placeholder_counters);
        self.counters_normalized_total
            .with_label_values(&["malformed"])
            .inc_by(report.malformed_counters);

        self.participants.set(report.leaderboard.len() as i64);
        self.run_duration_seconds.observe(duration.as_secs_f64());
    }

    /// Record a log rejected at ingestion
    pub fn record_rejected_run(&self) {
        self.rejected_runs_total.inc();
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Start a timer for a run
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer helper for measuring durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return the elapsed duration
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
