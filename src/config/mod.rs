//! Configuration management for the ledger
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod outcome;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, IngestSettings, ServiceSettings, StatsSettings};
pub use outcome::OutcomeVocabulary;
pub use rating::RatingConfig;
