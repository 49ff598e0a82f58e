//! Batch pipeline
//!
//! Runs the rating and aggregation engines over the same ordered log. The two
//! passes share no state, so they can also run side by side on the blocking
//! pool.

use crate::config::AppConfig;
use crate::error::{LedgerError, Result};
use crate::ingest::Ingestor;
use crate::rating::{EloRatingCalculator, RatingEngine};
use crate::report::RunReport;
use crate::stats::AggregationEngine;
use crate::types::{MatchRecord, RawMatch};
use std::sync::Arc;
use tokio::task::JoinError;

fn join_error(engine: &str, e: JoinError) -> LedgerError {
    LedgerError::InternalError {
        message: format!("{} pass did not complete: {}", engine, e),
    }
}

fn rating_engine(config: &AppConfig) -> Result<RatingEngine> {
    Ok(RatingEngine::new(EloRatingCalculator::new(
        config.rating.clone(),
    )?))
}

/// Run both engines one after the other
pub fn run_pipeline(records: &[MatchRecord], config: &AppConfig) -> Result<RunReport> {
    let rating = rating_engine(config)?.run(records)?;
    let stats = AggregationEngine::new(config.stats.tracked_counters.clone()).run(records)?;

    Ok(RunReport::from_runs(rating, stats))
}

/// Run both engines as independent blocking tasks and join their outputs
pub async fn run_pipeline_concurrent(
    records: Vec<MatchRecord>,
    config: &AppConfig,
) -> Result<RunReport> {
    let records = Arc::new(records);
    let mut rating_engine = rating_engine(config)?;
    let mut stats_engine = AggregationEngine::new(config.stats.tracked_counters.clone());

    let rating_records = records.clone();
    let rating_task = tokio::task::spawn_blocking(move || rating_engine.run(&rating_records));
    let stats_task = tokio::task::spawn_blocking(move || stats_engine.run(&records));

    let (rating, stats) = tokio::join!(rating_task, stats_task);
    let rating = rating.map_err(|e| join_error("rating", e))??;
    let stats = stats.map_err(|e| join_error("aggregation", e))??;

    Ok(RunReport::from_runs(rating, stats))
}

/// Ingest raw rows and run the sequential pipeline over them
pub fn run_raw(rows: Vec<RawMatch>, config: &AppConfig) -> Result<RunReport> {
    let records = Ingestor::from_config(config)?.ingest(rows)?;
    run_pipeline(&records, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, RawCounter, RawCounters};

    fn counters(strikes: &str) -> RawCounters {
        [("strikes".to_string(), RawCounter::from(strikes))]
            .into_iter()
            .collect()
    }

    fn log() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new(0, "A", "B", Outcome::AWin)
                .with_counters(counters("40"), counters("22")),
            MatchRecord::new(1, "A", "B", Outcome::BWin)
                .with_counters(counters("--"), counters("35")),
            MatchRecord::new(2, "C", "A", Outcome::Draw),
        ]
    }

    #[test]
    fn test_sequential_pipeline() {
        let report = run_pipeline(&log(), &AppConfig::default()).unwrap();

        assert_eq!(report.rated_matches.len(), 3);
        assert_eq!(report.rated_matches[1].rating_a_after, 997.71);
        assert_eq!(report.rated_matches[1].rating_b_after, 1002.29);
        assert_eq!(report.stats.len(), 3);
        assert_eq!(report.stats_of("B").unwrap().counter("strikes"), 57);
        assert_eq!(report.leaderboard.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let config = AppConfig::default();
        let sequential = run_pipeline(&log(), &config).unwrap();
        let concurrent = run_pipeline_concurrent(log(), &config).await.unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn test_invalid_rating_config_rejected() {
        let mut config = AppConfig::default();
        config.rating.k_factor = 0.0;

        assert!(run_pipeline(&log(), &config).is_err());
        assert!(run_pipeline_concurrent(log(), &config).await.is_err());
    }

    #[test]
    fn test_run_raw_rejects_unknown_outcome() {
        let rows = vec![RawMatch {
            participant_a: "A".to_string(),
            participant_b: "B".to_string(),
            outcome: "overturned".to_string(),
            counters_a: RawCounters::new(),
            counters_b: RawCounters::new(),
            event: None,
            event_date: None,
            details: Default::default(),
        }];

        let err = run_raw(rows, &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::UnknownOutcome { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_self_match_rejected_by_both_pipelines() {
        let records = vec![MatchRecord::new(0, "A", "A", Outcome::AWin)];
        let config = AppConfig::default();

        let err = run_pipeline(&records, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::InvalidRecord { index: 0, .. })
        ));

        let err = run_pipeline_concurrent(records, &config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LedgerError>(),
            Some(LedgerError::InvalidRecord { index: 0, .. })
        ));
    }
}

