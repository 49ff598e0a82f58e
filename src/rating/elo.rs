//! Elo rating calculator
//!
//! Logistic expected-score model with a fixed K-factor. The expected score
//! comes from the skillratings crate; the update itself is done here so the
//! rounded exchange can be applied with opposite signs to both participants.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::rating::calculator::RatingCalculator;
use crate::types::Outcome;
use crate::utils::round_rating;
use skillratings::elo::EloRating;

/// Probability that a participant rated `rating_a` beats one rated `rating_b`
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    let (expected_a, _) = skillratings::elo::expected_score(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
    );
    expected_a
}

/// Apply an actual score for A (1.0 win, 0.5 draw, 0.0 loss) to both ratings
///
/// The exchanged points are rounded to cents once and added to A and taken
/// from B, so the two rounded deltas always cancel.
pub fn apply_outcome(rating_a: f64, rating_b: f64, score_a: f64, k_factor: f64) -> (f64, f64) {
    let exchange = round_rating(k_factor * (score_a - expected_score(rating_a, rating_b)));

    (
        round_rating(rating_a + exchange),
        round_rating(rating_b - exchange),
    )
}

/// Elo implementation of [`RatingCalculator`]
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        expected_score(rating_a, rating_b)
    }

    fn rate(&self, rating_a: f64, rating_b: f64, outcome: Outcome) -> (f64, f64) {
        match outcome.score_for_a() {
            Some(score_a) => apply_outcome(rating_a, rating_b, score_a, self.config.k_factor),
            None => (rating_a, rating_b),
        }
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "initial_rating": self.config.initial_rating,
            "k_factor": self.config.k_factor,
        })
    }
}
