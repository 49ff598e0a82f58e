//! Metrics for batch runs of the ledger
//!
//! Prometheus counters for matches processed, counter values normalized and
//! logs rejected, rendered in the text exposition format.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer};
