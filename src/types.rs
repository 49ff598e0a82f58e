//! Common types used throughout the ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable participant identity (the fighter's name as it appears in the log)
pub type ParticipantId = String;

/// Raw per-side counters keyed by counter name
pub type RawCounters = BTreeMap<String, RawCounter>;

/// Passthrough columns the engine carries but never interprets
pub type Details = BTreeMap<String, serde_json::Value>;

/// Outcome of a match, always relative to `participant_a`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    AWin,
    BWin,
    Draw,
    NoContest,
}

impl Outcome {
    /// Actual score for participant A, or `None` when the match is unrated
    pub fn score_for_a(self) -> Option<f64> {
        match self {
            Outcome::AWin => Some(1.0),
            Outcome::Draw => Some(0.5),
            Outcome::BWin => Some(0.0),
            Outcome::NoContest => None,
        }
    }

    /// The same result seen from participant B's side
    pub fn reversed(self) -> Self {
        match self {
            Outcome::AWin => Outcome::BWin,
            Outcome::BWin => Outcome::AWin,
            other => other,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::AWin => write!(f, "A_WIN"),
            Outcome::BWin => write!(f, "B_WIN"),
            Outcome::Draw => write!(f, "DRAW"),
            Outcome::NoContest => write!(f, "NO_CONTEST"),
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A_WIN" => Ok(Outcome::AWin),
            "B_WIN" => Ok(Outcome::BWin),
            "DRAW" => Ok(Outcome::Draw),
            "NO_CONTEST" => Ok(Outcome::NoContest),
            other => Err(format!("unrecognized outcome kind: {}", other)),
        }
    }
}

/// A counter value exactly as the source delivered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCounter {
    Number(serde_json::Number),
    Text(String),
    Null,
}

impl From<&str> for RawCounter {
    fn from(value: &str) -> Self {
        RawCounter::Text(value.to_string())
    }
}

impl From<u64> for RawCounter {
    fn from(value: u64) -> Self {
        RawCounter::Number(value.into())
    }
}

/// One row of the match log as handed over by the crawl stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub participant_a: String,
    pub participant_b: String,
    /// Source outcome code, resolved through the configured vocabulary
    pub outcome: String,
    #[serde(default)]
    pub counters_a: RawCounters,
    #[serde(default)]
    pub counters_b: RawCounters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Sequence key used for optional chronological validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: Details,
}

/// A match record with its outcome resolved; immutable once ingested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Position in the chronological log
    pub index: usize,
    pub participant_a: ParticipantId,
    pub participant_b: ParticipantId,
    pub outcome: Outcome,
    #[serde(default)]
    pub counters_a: RawCounters,
    #[serde(default)]
    pub counters_b: RawCounters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: Details,
}

impl MatchRecord {
    /// Build a bare record without counters or metadata
    pub fn new(
        index: usize,
        participant_a: impl Into<ParticipantId>,
        participant_b: impl Into<ParticipantId>,
        outcome: Outcome,
    ) -> Self {
        Self {
            index,
            participant_a: participant_a.into(),
            participant_b: participant_b.into(),
            outcome,
            counters_a: RawCounters::new(),
            counters_b: RawCounters::new(),
            event: None,
            event_date: None,
            details: Details::new(),
        }
    }

    /// Attach raw counters for both sides
    pub fn with_counters(mut self, counters_a: RawCounters, counters_b: RawCounters) -> Self {
        self.counters_a = counters_a;
        self.counters_b = counters_b;
        self
    }
}

/// A match record augmented with the rating trajectory around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedMatchRecord {
    #[serde(flatten)]
    pub record: MatchRecord,
    pub rating_a_before: f64,
    pub rating_b_before: f64,
    pub rating_a_after: f64,
    pub rating_b_after: f64,
}

impl RatedMatchRecord {
    /// Rating change for participant A
    pub fn delta_a(&self) -> f64 {
        self.rating_a_after - self.rating_a_before
    }

    /// Rating change for participant B
    pub fn delta_b(&self) -> f64 {
        self.rating_b_after - self.rating_b_before
    }
}

/// One row of the final leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub participant: ParticipantId,
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_scores() {
        assert_eq!(Outcome::AWin.score_for_a(), Some(1.0));
        assert_eq!(Outcome::Draw.score_for_a(), Some(0.5));
        assert_eq!(Outcome::BWin.score_for_a(), Some(0.0));
        assert_eq!(Outcome::NoContest.score_for_a(), None);
    }

    #[test]
    fn test_outcome_reversed() {
        assert_eq!(Outcome::AWin.reversed(), Outcome::BWin);
        assert_eq!(Outcome::BWin.reversed(), Outcome::AWin);
        assert_eq!(Outcome::Draw.reversed(), Outcome::Draw);
        assert_eq!(Outcome::NoContest.reversed(), Outcome::NoContest);
    }

    #[test]
    fn test_outcome_parse_and_display() {
        for outcome in [
            Outcome::AWin,
            Outcome::BWin,
            Outcome::Draw,
            Outcome::NoContest,
        ] {
            assert_eq!(outcome.to_string().parse::<Outcome>().unwrap(), outcome);
        }
        assert_eq!(" a_win ".parse::<Outcome>().unwrap(), Outcome::AWin);
        assert!("win".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_raw_counter_deserialization() {
        let counters: RawCounters =
            serde_json::from_str(r#"{"kd": 2, "str": "45", "td": null, "sub": "--"}"#).unwrap();

        assert_eq!(counters["kd"], RawCounter::from(2u64));
        assert_eq!(counters["str"], RawCounter::from("45"));
        assert_eq!(counters["td"], RawCounter::Null);
        assert_eq!(counters["sub"], RawCounter::from("--"));
    }

    #[test]
    fn test_rated_record_flattens_match_fields() {
        let rated = RatedMatchRecord {
            record: MatchRecord::new(0, "A", "B", Outcome::AWin),
            rating_a_before: 1000.0,
            rating_b_before: 1000.0,
            rating_a_after: 1020.0,
            rating_b_after: 980.0,
        };

        let json = serde_json::to_value(&rated).unwrap();
        assert_eq!(json["participant_a"], "A");
        assert_eq!(json["outcome"], "A_WIN");
        assert_eq!(json["rating_a_after"], 1020.0);
        assert_eq!(rated.delta_a(), -rated.delta_b());
    }
}
