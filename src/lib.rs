//! Bout Ledger - Elo ratings and cumulative statistics over a fight log
//!
//! This crate consumes a chronologically ordered log of head-to-head matches,
//! maintains one Elo rating and one statistics bundle per participant, and
//! emits the augmented log, a leaderboard and a statistics table.

pub mod config;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod pipeline;
pub mod rating;
pub mod report;
pub mod stats;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LedgerError, Result};
pub use types::*;

// Re-export key components
pub use config::AppConfig;
pub use ingest::Ingestor;
pub use pipeline::{run_pipeline, run_pipeline_concurrent, run_raw};
pub use rating::{EloRatingCalculator, RatingEngine};
pub use report::RunReport;
pub use stats::AggregationEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
