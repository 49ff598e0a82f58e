//! Match log ingestion
//!
//! Turns raw crawl rows into typed [`MatchRecord`]s: outcome codes are resolved
//! once through the configured vocabulary, participants are checked, and the
//! optional chronological guard runs over the event dates. Any failure rejects
//! the whole log; nothing is reordered or dropped.

pub mod counters;

pub use counters::{parse_counter, read_counter, read_raw_counter, CounterReading};

use crate::config::{AppConfig, OutcomeVocabulary};
use crate::error::{LedgerError, Result};
use crate::types::{MatchRecord, RawMatch};
use chrono::NaiveDate;
use tracing::{error, info};

/// Resolves raw rows into match records
#[derive(Debug, Clone)]
pub struct Ingestor {
    vocabulary: OutcomeVocabulary,
    validate_order: bool,
}

impl Ingestor {
    /// Create an ingestor with an explicit vocabulary
    pub fn new(vocabulary: OutcomeVocabulary, validate_order: bool) -> Result<Self> {
        vocabulary.validate()?;

        Ok(Self {
            vocabulary,
            validate_order,
        })
    }

    /// Create an ingestor from the application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.outcomes.clone(), config.ingest.validate_order)
    }

    /// Resolve a single row at its log position
    pub fn resolve(&self, index: usize, raw: RawMatch) -> Result<MatchRecord> {
        let participant_a = raw.participant_a.trim().to_string();
        let participant_b = raw.participant_b.trim().to_string();

        check_participants(index, &participant_a, &participant_b)?;

        let outcome = match self.vocabulary.resolve(&raw.outcome) {
            Some(outcome) => outcome,
            None => {
                return Err(LedgerError::UnknownOutcome {
                    index,
                    participant_a,
                    participant_b,
                    code: raw.outcome,
                }
                .into())
            }
        };

        Ok(MatchRecord {
            index,
            participant_a,
            participant_b,
            outcome,
            counters_a: raw.counters_a,
            counters_b: raw.counters_b,
            event: raw.event,
            event_date: raw.event_date,
            details: raw.details,
        })
    }

    /// Resolve a whole log, preserving its order
    pub fn ingest(&self, rows: Vec<RawMatch>) -> Result<Vec<MatchRecord>> {
        let mut records = Vec::with_capacity(rows.len());
        for (index, raw) in rows.into_iter().enumerate() {
            match self.resolve(index, raw) {
                Ok(record) => records.push(record),
                Err(e) => {
                    error!("Rejecting match log: {}", e);
                    return Err(e);
                }
            }
        }

        if self.validate_order {
            if let Err(e) = validate_order(&records) {
                error!("Rejecting match log: {}", e);
                return Err(e);
            }
        }

        info!("Ingested {} match records", records.len());
        Ok(records)
    }
}

/// Reject records with an empty name or a participant facing themselves
pub fn check_participants(index: usize, participant_a: &str, participant_b: &str) -> Result<()> {
    let reason = if participant_a.is_empty() || participant_b.is_empty() {
        "participant name is empty"
    } else if participant_a == participant_b {
        "participant cannot face themselves"
    } else {
        return Ok(());
    };

    Err(LedgerError::InvalidRecord {
        index,
        participant_a: participant_a.to_string(),
        participant_b: participant_b.to_string(),
        reason: reason.to_string(),
    }
    .into())
}

/// Check that event dates never go backwards; undated records are skipped
pub fn validate_order(records: &[MatchRecord]) -> Result<()> {
    let mut last: Option<(usize, NaiveDate)> = None;

    for record in records {
        let Some(current) = record.event_date else {
            continue;
        };

        if let Some((previous_index, previous)) = last {
            if current < previous {
                return Err(LedgerError::UnorderedInput {
                    index: record.index,
                    participant_a: record.participant_a.clone(),
                    participant_b: record.participant_b.clone(),
                    previous_index,
                    previous,
                    current,
                }
                .into());
            }
        }

        last = Some((record.index, current));
    }

    Ok(())
}
