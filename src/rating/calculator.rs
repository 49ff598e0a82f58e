//! Rating calculator trait
//!
//! This module defines the interface for pairwise rating updates so the engine
//! does not depend on a particular rating formula.

use crate::types::Outcome;

/// Trait for calculating rating changes after a head-to-head match
pub trait RatingCalculator: Send + Sync {
    /// Probability that A beats B given their current ratings
    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64;

    /// Calculate both post-match ratings
    ///
    /// # Arguments
    /// * `rating_a` - Current rating of participant A
    /// * `rating_b` - Current rating of participant B
    /// * `outcome` - Result relative to participant A
    ///
    /// # Returns
    /// `(new_rating_a, new_rating_b)`; unrated outcomes return the inputs unchanged
    fn rate(&self, rating_a: f64, rating_b: f64, outcome: Outcome) -> (f64, f64);

    /// Get the initial rating for participants seen for the first time
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
