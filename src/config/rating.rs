//! Rating system configuration

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// Reference starting rating for unseen participants
pub const DEFAULT_INITIAL_RATING: f64 = 1000.0;

/// Reference K-factor (maximum points exchanged per match)
pub const DEFAULT_K_FACTOR: f64 = 40.0;

/// Elo parameters for a rating run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned the first time a participant is seen
    pub initial_rating: f64,
    /// Scale of the rating exchange per match
    pub k_factor: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: DEFAULT_INITIAL_RATING,
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(LedgerError::ConfigurationError {
                message: "Initial rating must be a finite number".to_string(),
            }
            .into());
        }

        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(LedgerError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
