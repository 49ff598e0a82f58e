//! Per-participant counter bundles

use crate::ingest::counters::{read_raw_counter, CounterReading};
use crate::types::{Outcome, ParticipantId, RawCounters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative statistics for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub participant: ParticipantId,
    pub matches: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub no_contests: u64,
    /// Running sum per tracked counter
    pub counters: BTreeMap<String, u64>,
}

/// How the raw counters of one appearance were read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterTally {
    pub placeholders: u64,
    pub malformed: u64,
}

impl CounterTally {
    pub fn merge(&mut self, other: CounterTally) {
        self.placeholders += other.placeholders;
        self.malformed += other.malformed;
    }
}

impl ParticipantStats {
    /// Empty bundle with every tracked counter at zero
    pub fn new(participant: impl Into<ParticipantId>, tracked_counters: &[String]) -> Self {
        Self {
            participant: participant.into(),
            matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            no_contests: 0,
            counters: tracked_counters
                .iter()
                .map(|name| (name.clone(), 0))
                .collect(),
        }
    }

    /// Fold in one appearance
    ///
    /// `outcome` is seen from this participant's side: `AWin` is a win for them.
    /// A tracked counter missing from `raw` counts as a placeholder.
    pub fn record_match(
        &mut self,
        outcome: Outcome,
        raw: &RawCounters,
        tracked_counters: &[String],
    ) -> CounterTally {
        self.matches += 1;
        match outcome {
            Outcome::AWin => self.wins += 1,
            Outcome::BWin => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::NoContest => self.no_contests += 1,
        }

        let mut tally = CounterTally::default();
        for name in tracked_counters {
            let reading = raw
                .get(name)
                .map(read_raw_counter)
                .unwrap_or(CounterReading::Placeholder);
            match reading {
                CounterReading::Value(_) => {}
                CounterReading::Placeholder => tally.placeholders += 1,
                CounterReading::Malformed => tally.malformed += 1,
            }
            let total = self.counters.entry(name.clone()).or_insert(0);
            *total = total.saturating_add(reading.value());
        }

        tally
    }

    /// Total of a tracked counter (zero if untracked)
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Every match falls in exactly one outcome bucket
    pub fn is_consistent(&self) -> bool {
        self.matches == self.wins + self.losses + self.draws + self.no_contests
    }
}
