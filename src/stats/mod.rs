//! Cumulative per-participant statistics
//!
//! Outcome tallies and running sums of the tracked numeric counters, built in a
//! single ordered pass independent of the rating engine.

pub mod aggregate;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use aggregate::{CounterTally, ParticipantStats};
pub use engine::{AggregationEngine, StatsRun};
pub use storage::{InMemoryStatsStorage, StatsStorage};
