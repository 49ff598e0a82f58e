//! Statistics storage interface and in-memory implementation

use crate::error::Result;
use crate::stats::aggregate::ParticipantStats;
use crate::types::ParticipantId;
use std::collections::HashMap;

/// Trait for tracking per-participant statistics
pub trait StatsStorage: Send {
    /// Get statistics for a participant
    fn get_stats(&self, participant: &str) -> Result<Option<ParticipantStats>>;

    /// Insert or replace a participant's statistics
    fn store_stats(&mut self, stats: ParticipantStats) -> Result<()>;

    /// All bundles in first-seen order
    fn get_all_stats(&self) -> Result<Vec<ParticipantStats>>;
}

/// In-memory statistics store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsStorage {
    entries: Vec<ParticipantStats>,
    positions: HashMap<ParticipantId, usize>,
}

impl InMemoryStatsStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStorage for InMemoryStatsStorage {
    fn get_stats(&self, participant: &str) -> Result<Option<ParticipantStats>> {
        Ok(self
            .positions
            .get(participant)
            .map(|&position| self.entries[position].clone()))
    }

    fn store_stats(&mut self, stats: ParticipantStats) -> Result<()> {
        match self.positions.get(&stats.participant) {
            Some(&position) => self.entries[position] = stats,
            None => {
                self.positions
                    .insert(stats.participant.clone(), self.entries.len());
                self.entries.push(stats);
            }
        }

        Ok(())
    }

    fn get_all_stats(&self) -> Result<Vec<ParticipantStats>> {
        Ok(self.entries.clone())
    }
}
