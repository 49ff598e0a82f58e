//! Report shaping
//!
//! Combines the outputs of the two engines into the tables handed to the
//! caller: the augmented match log, the leaderboard, the statistics table and
//! the derived top-N views. Nothing here touches the filesystem.

use crate::error::Result;
use crate::rating::RatingRun;
use crate::stats::{ParticipantStats, StatsRun};
use crate::types::{LeaderboardEntry, RatedMatchRecord};
use crate::utils::format_rating;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Everything produced by one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub rated_matches: Vec<RatedMatchRecord>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub stats: Vec<ParticipantStats>,
    pub tracked_counters: Vec<String>,
    pub placeholder_counters: u64,
    pub malformed_counters: u64,
}

/// A column of the statistics table that can be ranked
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatColumn {
    Matches,
    Wins,
    Losses,
    Draws,
    NoContests,
    Counter(String),
}

impl StatColumn {
    /// Value of this column for a participant
    pub fn value(&self, stats: &ParticipantStats) -> u64 {
        match self {
            StatColumn::Matches => stats.matches,
            StatColumn::Wins => stats.wins,
            StatColumn::Losses => stats.losses,
            StatColumn::Draws => stats.draws,
            StatColumn::NoContests => stats.no_contests,
            StatColumn::Counter(name) => stats.counter(name),
        }
    }
}

impl std::str::FromStr for StatColumn {
    type Err = std::convert::Infallible;

    /// Outcome columns by name; anything else is a tracked counter
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "matches" => StatColumn::Matches,
            "wins" => StatColumn::Wins,
            "losses" => StatColumn::Losses,
            "draws" => StatColumn::Draws,
            "no_contests" => StatColumn::NoContests,
            _ => StatColumn::Counter(s.trim().to_string()),
        })
    }
}

impl std::fmt::Display for StatColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatColumn::Matches => write!(f, "matches"),
            StatColumn::Wins => write!(f, "wins"),
            StatColumn::Losses => write!(f, "losses"),
            StatColumn::Draws => write!(f, "draws"),
            StatColumn::NoContests => write!(f, "no_contests"),
            StatColumn::Counter(name) => write!(f, "{}", name),
        }
    }
}

impl RunReport {
    /// Assemble a report from the two independent passes
    pub fn from_runs(rating: RatingRun, stats: StatsRun) -> Self {
        Self {
            rated_matches: rating.rated,
            leaderboard: rating.leaderboard,
            stats: stats.stats,
            tracked_counters: stats.tracked_counters,
            placeholder_counters: stats.placeholder_counters,
            malformed_counters: stats.malformed_counters,
        }
    }

    /// Highest rated participants
    pub fn top_rated(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.leaderboard[..limit.min(self.leaderboard.len())]
    }

    /// Participants ranked by a statistics column, ties in first-seen order
    pub fn top_by(&self, column: &StatColumn, limit: usize) -> Vec<&ParticipantStats> {
        let mut ranked: Vec<&ParticipantStats> = self.stats.iter().collect();
        ranked.sort_by(|a, b| column.value(b).cmp(&column.value(a)));
        ranked.truncate(limit);
        ranked
    }

    /// Case-insensitive substring search over participant names, alphabetical
    pub fn search(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        let mut names: Vec<&str> = self
            .stats
            .iter()
            .map(|stats| stats.participant.as_str())
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect();
        names.sort_unstable();
        names.truncate(limit);
        names
    }

    /// Final rating of a participant
    pub fn rating_of(&self, participant: &str) -> Option<f64> {
        self.leaderboard
            .iter()
            .find(|entry| entry.participant == participant)
            .map(|entry| entry.rating)
    }

    /// Final statistics of a participant
    pub fn stats_of(&self, participant: &str) -> Option<&ParticipantStats> {
        self.stats
            .iter()
            .find(|stats| stats.participant == participant)
    }

    /// Serialized augmented match log
    pub fn rated_matches_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rated_matches)?)
    }

    /// Serialized leaderboard
    pub fn leaderboard_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.leaderboard)?)
    }

    /// Serialized statistics table
    pub fn stats_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stats)?)
    }
}

/// Plain-text leaderboard with two-decimal ratings
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let width = entries
        .iter()
        .map(|entry| entry.participant.chars().count())
        .max()
        .unwrap_or(0)
        .max("participant".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<width$}  {:>9}", "rank", "participant", "rating");
    for (position, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>9}",
            position + 1,
            entry.participant,
            format_rating(entry.rating)
        );
    }
    out
}

/// Plain-text statistics table with the tracked counters as trailing columns
pub fn render_stats_table(stats: &[&ParticipantStats], tracked_counters: &[String]) -> String {
    let width = stats
        .iter()
        .map(|row| row.participant.chars().count())
        .max()
        .unwrap_or(0)
        .max("participant".len());

    let mut out = String::new();
    let _ = write!(
        out,
        "{:<width$}  {:>7}  {:>4}  {:>6}  {:>5}  {:>11}",
        "participant", "matches", "wins", "losses", "draws", "no_contests"
    );
    for name in tracked_counters {
        let _ = write!(out, "  {:>w$}", name, w = name.len().max(6));
    }
    out.push('\n');

    for row in stats {
        let _ = write!(
            out,
            "{:<width$}  {:>7}  {:>4}  {:>6}  {:>5}  {:>11}",
            row.participant, row.matches, row.wins, row.losses, row.draws, row.no_contests
        );
        for name in tracked_counters {
            let _ = write!(out, "  {:>w$}", row.counter(name), w = name.len().max(6));
        }
        out.push('\n');
    }
    out
}
