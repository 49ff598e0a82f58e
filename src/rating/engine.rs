//! Sequential rating pass over a match log
//!
//! A participant's rating after match *n* depends on every earlier match they
//! fought, so the engine consumes the log strictly left to right and never
//! reorders it.

use crate::error::Result;
use crate::ingest::check_participants;
use crate::rating::calculator::RatingCalculator;
use crate::rating::elo::EloRatingCalculator;
use crate::rating::storage::{InMemoryRatingStorage, RatingEntry, RatingStorage};
use crate::types::{LeaderboardEntry, MatchRecord, RatedMatchRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Output of a full rating pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRun {
    /// Every input record with its before/after snapshots, in log order
    pub rated: Vec<RatedMatchRecord>,
    /// Final ratings, highest first, ties in first-seen order
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Rating engine owning the rating state for one batch run
pub struct RatingEngine<S: RatingStorage = InMemoryRatingStorage> {
    calculator: Box<dyn RatingCalculator>,
    storage: S,
    processed: u64,
}

impl RatingEngine<InMemoryRatingStorage> {
    /// Create an engine with in-memory state
    pub fn new(calculator: impl RatingCalculator + 'static) -> Self {
        Self::with_storage(calculator, InMemoryRatingStorage::new())
    }
}

impl Default for RatingEngine<InMemoryRatingStorage> {
    fn default() -> Self {
        Self::new(EloRatingCalculator::default())
    }
}

impl<S: RatingStorage> RatingEngine<S> {
    /// Create an engine over a caller-provided store
    pub fn with_storage(calculator: impl RatingCalculator + 'static, storage: S) -> Self {
        Self {
            calculator: Box::new(calculator),
            storage,
            processed: 0,
        }
    }

    /// Number of matches applied so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Read-only access to the underlying store
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn entry_or_default(&self, participant: &str) -> Result<RatingEntry> {
        Ok(self
            .storage
            .get_rating(participant)?
            .unwrap_or_else(|| RatingEntry::new(participant, self.calculator.initial_rating())))
    }

    /// Apply one match and return the record with its rating snapshots
    pub fn process(&mut self, record: &MatchRecord) -> Result<RatedMatchRecord> {
        check_participants(record.index, &record.participant_a, &record.participant_b)?;

        let mut entry_a = self.entry_or_default(&record.participant_a)?;
        let mut entry_b = self.entry_or_default(&record.participant_b)?;

        let rating_a_before = entry_a.rating;
        let rating_b_before = entry_b.rating;

        let (rating_a_after, rating_b_after) =
            self.calculator
                .rate(rating_a_before, rating_b_before, record.outcome);

        entry_a.update_rating(rating_a_after);
        entry_b.update_rating(rating_b_after);
        self.storage.store_rating(entry_a)?;
        self.storage.store_rating(entry_b)?;
        self.processed += 1;

        debug!(
            "Match {}: {} {:.2} -> {:.2}, {} {:.2} -> {:.2} ({})",
            record.index,
            record.participant_a,
            rating_a_before,
            rating_a_after,
            record.participant_b,
            rating_b_before,
            rating_b_after,
            record.outcome
        );

        Ok(RatedMatchRecord {
            record: record.clone(),
            rating_a_before,
            rating_b_before,
            rating_a_after,
            rating_b_after,
        })
    }

    /// Current rating of a participant, if they have been seen
    pub fn rating_of(&self, participant: &str) -> Result<Option<f64>> {
        Ok(self
            .storage
            .get_rating(participant)?
            .map(|entry| entry.rating))
    }

    /// Current ratings sorted descending; equal ratings keep first-seen order
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.storage.get_all_ratings()?;
        // Stable sort keeps insertion order among ties
        entries.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        Ok(entries
            .into_iter()
            .map(|entry| LeaderboardEntry {
                participant: entry.participant,
                rating: entry.rating,
            })
            .collect())
    }

    /// Consume a whole log in order
    pub fn run(&mut self, records: &[MatchRecord]) -> Result<RatingRun> {
        let mut rated = Vec::with_capacity(records.len());
        for record in records {
            rated.push(self.process(record)?);
        }

        let leaderboard = self.leaderboard()?;
        info!(
            "Rated {} matches across {} participants",
            rated.len(),
            leaderboard.len()
        );

        Ok(RatingRun { rated, leaderboard })
    }
}
