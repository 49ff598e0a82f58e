//! Utility functions for the rating ledger

/// Round a rating value to two decimal places
pub fn round_rating(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a rating as two-decimal fixed point
pub fn format_rating(value: f64) -> String {
    format!("{:.2}", value)
}
