//! Sequential aggregation pass over a match log

use crate::error::Result;
use crate::ingest::check_participants;
use crate::stats::aggregate::{CounterTally, ParticipantStats};
use crate::stats::storage::{InMemoryStatsStorage, StatsStorage};
use crate::types::{MatchRecord, Outcome, ParticipantId, RawCounters};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Output of a full aggregation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRun {
    /// One bundle per participant in first-seen order
    pub stats: Vec<ParticipantStats>,
    /// Tracked counter names, in column order
    pub tracked_counters: Vec<String>,
    /// Counter values that were placeholders or absent
    pub placeholder_counters: u64,
    /// Counter values that could not be read and were taken as zero
    pub malformed_counters: u64,
}

/// Aggregation engine owning the statistics state for one batch run
pub struct AggregationEngine<S: StatsStorage = InMemoryStatsStorage> {
    tracked_counters: Vec<String>,
    storage: S,
    tally: CounterTally,
    processed: u64,
}

impl AggregationEngine<InMemoryStatsStorage> {
    /// Create an engine with in-memory state
    pub fn new(tracked_counters: Vec<String>) -> Self {
        Self::with_storage(tracked_counters, InMemoryStatsStorage::new())
    }
}

impl<S: StatsStorage> AggregationEngine<S> {
    /// Create an engine over a caller-provided store
    pub fn with_storage(tracked_counters: Vec<String>, storage: S) -> Self {
        Self {
            tracked_counters,
            storage,
            tally: CounterTally::default(),
            processed: 0,
        }
    }

    /// Number of matches applied so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn apply_side(
        &mut self,
        index: usize,
        participant: &ParticipantId,
        outcome: Outcome,
        counters: &RawCounters,
    ) -> Result<()> {
        let mut stats = self
            .storage
            .get_stats(participant)?
            .unwrap_or_else(|| ParticipantStats::new(participant.as_str(), &self.tracked_counters));

        let tally = stats.record_match(outcome, counters, &self.tracked_counters);
        if tally.malformed > 0 {
            debug!(
                "Match {}: {} malformed counter value(s) for {} read as zero",
                index, tally.malformed, participant
            );
        }
        self.tally.merge(tally);

        self.storage.store_stats(stats)
    }

    /// Update both participants' bundles for one match
    ///
    /// Self-matches and empty names are rejected before any state changes.
    pub fn process(&mut self, record: &MatchRecord) -> Result<()> {
        check_participants(record.index, &record.participant_a, &record.participant_b)?;

        self.apply_side(
            record.index,
            &record.participant_a,
            record.outcome,
            &record.counters_a,
        )?;
        self.apply_side(
            record.index,
            &record.participant_b,
            record.outcome.reversed(),
            &record.counters_b,
        )?;
        self.processed += 1;

        Ok(())
    }

    /// Current statistics of a participant, if they have been seen
    pub fn stats_of(&self, participant: &str) -> Result<Option<ParticipantStats>> {
        self.storage.get_stats(participant)
    }

    /// Snapshot of everything aggregated so far
    pub fn snapshot(&self) -> Result<StatsRun> {
        Ok(StatsRun {
            stats: self.storage.get_all_stats()?,
            tracked_counters: self.tracked_counters.clone(),
            placeholder_counters: self.tally.placeholders,
            malformed_counters: self.tally.malformed,
        })
    }

    /// Consume a whole log in order
    pub fn run(&mut self, records: &[MatchRecord]) -> Result<StatsRun> {
        for record in records {
            self.process(record)?;
        }

        let run = self.snapshot()?;
        info!(
            "Aggregated {} matches across {} participants ({} malformed counter values)",
            records.len(),
            run.stats.len(),
            run.malformed_counters
        );

        Ok(run)
    }
}
