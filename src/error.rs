//! Error types for the rating ledger
//!
//! Domain failures are typed with thiserror and travel through the crate as
//! anyhow errors, so callers can downcast when they need the details.

use chrono::NaiveDate;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ledger scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Unknown outcome code {code:?} at record {index} ({participant_a} vs {participant_b})")]
    UnknownOutcome {
        index: usize,
        participant_a: String,
        participant_b: String,
        code: String,
    },

    #[error(
        "Out-of-order record {index} ({participant_a} vs {participant_b}): \
         {current} is earlier than {previous} at record {previous_index}"
    )]
    UnorderedInput {
        index: usize,
        participant_a: String,
        participant_b: String,
        previous_index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Invalid record {index} ({participant_a} vs {participant_b}): {reason}")]
    InvalidRecord {
        index: usize,
        participant_a: String,
        participant_b: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal ledger error: {message}")]
    InternalError { message: String },
}
