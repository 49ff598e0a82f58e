//! Rating storage interface and implementations
//!
//! The store is owned by a single rating engine for the duration of a run and
//! is mutated through `&mut self`, so every match application is one
//! read-modify-write that nothing else can observe half done. Entries are never
//! removed and keep the order in which participants were first seen.

use crate::error::Result;
use crate::types::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage entry for a participant's rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub participant: ParticipantId,
    pub rating: f64,
    /// Matches this participant appeared in, rated or not
    pub matches: u64,
}

impl RatingEntry {
    /// Create a new entry for a participant seen for the first time
    pub fn new(participant: impl Into<ParticipantId>, initial_rating: f64) -> Self {
        Self {
            participant: participant.into(),
            rating: initial_rating,
            matches: 0,
        }
    }

    /// Update the rating and count the appearance
    pub fn update_rating(&mut self, new_rating: f64) {
        self.rating = new_rating;
        self.matches += 1;
    }
}

/// Trait for rating storage operations
#[cfg_attr(test, mockall::automock)]
pub trait RatingStorage: Send {
    /// Get a participant's rating entry
    fn get_rating(&self, participant: &str) -> Result<Option<RatingEntry>>;

    /// Insert or replace a participant's entry
    fn store_rating(&mut self, entry: RatingEntry) -> Result<()>;

    /// All entries in first-seen order
    fn get_all_ratings(&self) -> Result<Vec<RatingEntry>>;

    /// Get total number of rated participants
    fn get_participant_count(&self) -> Result<usize>;
}

/// In-memory rating storage implementation
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatingStorage {
    entries: Vec<RatingEntry>,
    positions: HashMap<ParticipantId, usize>,
}

impl InMemoryRatingStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn get_rating(&self, participant: &str) -> Result<Option<RatingEntry>> {
        Ok(self
            .positions
            .get(participant)
            .map(|&position| self.entries[position].clone()))
    }

    fn store_rating(&mut self, entry: RatingEntry) -> Result<()> {
        match self.positions.get(&entry.participant) {
            Some(&position) => self.entries[position] = entry,
            None => {
                self.positions
                    .insert(entry.participant.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }

        Ok(())
    }

    fn get_all_ratings(&self) -> Result<Vec<RatingEntry>> {
        Ok(self.entries.clone())
    }

    fn get_participant_count(&self) -> Result<usize> {
        Ok(self.entries.len())
    }
}
