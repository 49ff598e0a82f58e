//! Main application configuration
//!
//! This module defines the top-level configuration for a ledger run, including
//! TOML file loading, environment variable overrides and validation.

use crate::config::outcome::OutcomeVocabulary;
use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Counters accumulated by default, named after the crawl's columns
pub const DEFAULT_TRACKED_COUNTERS: [&str; 4] =
    ["knockdowns", "strikes", "takedowns", "submissions"];

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub stats: StatsSettings,
    pub outcomes: OutcomeVocabulary,
    pub ingest: IngestSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in logs and metric prefixes
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Numeric counters summed per participant, in output column order
    pub tracked_counters: Vec<String>,
}

/// Ingestion settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Reject logs whose event dates go backwards
    pub validate_order: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "bout-ledger".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            tracked_counters: DEFAULT_TRACKED_COUNTERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Apply environment overrides on top of the current values
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(initial) = env::var("INITIAL_RATING") {
            self.rating.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(k_factor) = env::var("K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k_factor))?;
        }

        if let Ok(counters) = env::var("TRACKED_COUNTERS") {
            self.stats.tracked_counters = counters
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }

        if let Ok(validate) = env::var("VALIDATE_ORDER") {
            self.ingest.validate_order = validate
                .parse()
                .map_err(|_| anyhow!("Invalid VALIDATE_ORDER value: {}", validate))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;
    config.outcomes.validate()?;

    let mut seen = std::collections::HashSet::new();
    for counter in &config.stats.tracked_counters {
        if counter.trim().is_empty() {
            return Err(anyhow!("Tracked counter names cannot be empty"));
        }
        if !seen.insert(counter.as_str()) {
            return Err(anyhow!("Tracked counter listed twice: {}", counter));
        }
    }

    Ok(())
}
