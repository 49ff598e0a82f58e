//! Test fixtures and recording implementations for integration testing

#![allow(dead_code)]

use bout_ledger::error::Result;
use bout_ledger::rating::{InMemoryRatingStorage, RatingEntry, RatingStorage};
use bout_ledger::types::{MatchRecord, Outcome, RawCounter, RawCounters, RawMatch};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

/// Rating store that records every write while delegating to the in-memory store
#[derive(Debug, Default, Clone)]
pub struct RecordingRatingStorage {
    inner: InMemoryRatingStorage,
    writes: Arc<Mutex<Vec<RatingEntry>>>,
}

impl RecordingRatingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle on the write journal, usable after the store is moved
    pub fn journal(&self) -> Arc<Mutex<Vec<RatingEntry>>> {
        self.writes.clone()
    }
}

impl RatingStorage for RecordingRatingStorage {
    fn get_rating(&self, participant: &str) -> Result<Option<RatingEntry>> {
        self.inner.get_rating(participant)
    }

    fn store_rating(&mut self, entry: RatingEntry) -> Result<()> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(entry.clone());
        }
        self.inner.store_rating(entry)
    }

    fn get_all_ratings(&self) -> Result<Vec<RatingEntry>> {
        self.inner.get_all_ratings()
    }

    fn get_participant_count(&self) -> Result<usize> {
        self.inner.get_participant_count()
    }
}

/// Counter map from name/value pairs
pub fn counters(pairs: &[(&str, &str)]) -> RawCounters {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), RawCounter::from(*value)))
        .collect()
}

/// Raw crawl row without counters
pub fn raw_match(a: &str, b: &str, outcome: &str) -> RawMatch {
    RawMatch {
        participant_a: a.to_string(),
        participant_b: b.to_string(),
        outcome: outcome.to_string(),
        counters_a: RawCounters::new(),
        counters_b: RawCounters::new(),
        event: None,
        event_date: None,
        details: Default::default(),
    }
}

/// Raw crawl row with an event name and date
pub fn dated_match(
    a: &str,
    b: &str,
    outcome: &str,
    event: &str,
    date: (i32, u32, u32),
) -> RawMatch {
    RawMatch {
        event: Some(event.to_string()),
        event_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        ..raw_match(a, b, outcome)
    }
}

/// Typed log from (a, b, outcome) triples, indexed in order
pub fn log(matches: &[(&str, &str, Outcome)]) -> Vec<MatchRecord> {
    matches
        .iter()
        .enumerate()
        .map(|(index, (a, b, outcome))| MatchRecord::new(index, *a, *b, *outcome))
        .collect()
}

/// Small card in the shape the crawl produces, counters included
pub fn fight_card() -> Vec<RawMatch> {
    vec![
        RawMatch {
            counters_a: counters(&[("knockdowns", "1"), ("strikes", "45"), ("takedowns", "2")]),
            counters_b: counters(&[("knockdowns", "0"), ("strikes", "21"), ("takedowns", "0")]),
            ..dated_match("Jon Jones", "Daniel Cormier", "win", "UFC 182", (2015, 1, 3))
        },
        RawMatch {
            counters_a: counters(&[("knockdowns", "0"), ("strikes", "--"), ("takedowns", "")]),
            counters_b: counters(&[("knockdowns", "2"), ("strikes", "60"), ("takedowns", "1")]),
            ..dated_match("Anderson Silva", "Jon Jones", "loss", "UFC 200", (2016, 7, 9))
        },
        RawMatch {
            counters_a: counters(&[("knockdowns", "0"), ("strikes", "33"), ("takedowns", "3")]),
            counters_b: counters(&[("knockdowns", "n/a"), ("strikes", "30"), ("takedowns", "1")]),
            ..dated_match("Daniel Cormier", "Anderson Silva", "draw", "UFC 200", (2016, 7, 9))
        },
        RawMatch {
            counters_a: counters(&[("knockdowns", "0"), ("strikes", "12"), ("takedowns", "0")]),
            counters_b: counters(&[("knockdowns", "0"), ("strikes", "8"), ("takedowns", "0")]),
            ..dated_match("Jon Jones", "Daniel Cormier", "NC", "UFC 214", (2017, 7, 29))
        },
    ]
}
