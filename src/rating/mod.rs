//! Pairwise Elo rating
//!
//! This module provides the Elo calculator, the per-participant rating store
//! and the engine that replays a match log through them.

pub mod calculator;
pub mod elo;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{apply_outcome, expected_score, EloRatingCalculator};
pub use engine::{RatingEngine, RatingRun};
pub use storage::{InMemoryRatingStorage, RatingEntry, RatingStorage};
