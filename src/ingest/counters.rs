//! Numeric counter normalization
//!
//! The crawl delivers counters as loosely formatted text. Parsing here is total:
//! every input yields a count, with placeholders and garbage reading as zero.

use crate::types::RawCounter;

/// Placeholder spellings that stand for "no value"
const PLACEHOLDERS: [&str; 5] = ["", "-", "--", "nan", "none"];

/// Classification of a raw counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterReading {
    /// A proper non-negative integer
    Value(u64),
    /// A known "no value" marker
    Placeholder,
    /// Anything else (negative, fractional, free text)
    Malformed,
}

impl CounterReading {
    /// The count this reading contributes to a running sum
    pub fn value(self) -> u64 {
        match self {
            CounterReading::Value(value) => value,
            CounterReading::Placeholder | CounterReading::Malformed => 0,
        }
    }
}

/// Classify a textual counter
pub fn read_counter(raw: &str) -> CounterReading {
    let trimmed = raw.trim();
    if PLACEHOLDERS
        .iter()
        .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
    {
        return CounterReading::Placeholder;
    }

    if let Ok(value) = trimmed.parse::<u64>() {
        return CounterReading::Value(value);
    }

    // Spreadsheet round-trips turn integer columns with gaps into floats ("3.0")
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value < u64::MAX as f64 && value.fract() == 0.0 => {
            CounterReading::Value(value as u64)
        }
        Ok(value) if value.is_nan() => CounterReading::Placeholder,
        _ => CounterReading::Malformed,
    }
}

/// Classify a raw counter as delivered by the source
pub fn read_raw_counter(raw: &RawCounter) -> CounterReading {
    match raw {
        RawCounter::Null => CounterReading::Placeholder,
        RawCounter::Text(text) => read_counter(text),
        RawCounter::Number(number) => match number.as_u64() {
            Some(value) => CounterReading::Value(value),
            None => read_counter(&number.to_string()),
        },
    }
}

/// Parse a textual counter, normalizing anything unusable to zero
pub fn parse_counter(raw: &str) -> u64 {
    read_counter(raw).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integers() {
        assert_eq!(read_counter("0"), CounterReading::Value(0));
        assert_eq!(read_counter("17"), CounterReading::Value(17));
        assert_eq!(read_counter("  4 "), CounterReading::Value(4));
    }

    #[test]
    fn test_placeholders_normalize_to_zero() {
        for raw in ["", "-", "--", "nan", "NaN", "None", "none", "   "] {
            assert_eq!(read_counter(raw), CounterReading::Placeholder, "{:?}", raw);
            assert_eq!(parse_counter(raw), 0);
        }
    }

    #[test]
    fn test_malformed_text_normalizes_to_zero() {
        for raw in ["abc", "-3", "2.5", "1 of 3", "inf"] {
            assert_eq!(read_counter(raw), CounterReading::Malformed, "{:?}", raw);
            assert_eq!(parse_counter(raw), 0);
        }
    }

    #[test]
    fn test_integral_floats_accepted() {
        assert_eq!(read_counter("3.0"), CounterReading::Value(3));
        assert_eq!(read_counter("0.0"), CounterReading::Value(0));
    }

    #[test]
    fn test_raw_counter_variants() {
        assert_eq!(read_raw_counter(&RawCounter::from(5u64)), CounterReading::Value(5));
        assert_eq!(read_raw_counter(&RawCounter::from("--")), CounterReading::Placeholder);
        assert_eq!(read_raw_counter(&RawCounter::Null), CounterReading::Placeholder);

        let negative: RawCounter = serde_json::from_str("-2").unwrap();
        assert_eq!(read_raw_counter(&negative), CounterReading::Malformed);

        let float: RawCounter = serde_json::from_str("6.0").unwrap();
        assert_eq!(read_raw_counter(&float), CounterReading::Value(6));
    }

    #[test]
    fn test_out_of_range_floats_are_malformed() {
        for raw in ["1e30", "18446744073709551616.0", "1e400"] {
            assert_eq!(read_counter(raw), CounterReading::Malformed, "{:?}", raw);
        }
        assert_eq!(
            read_counter("18446744073709551615"),
            CounterReading::Value(u64::MAX)
        );
        assert_eq!(read_counter("1e3"), CounterReading::Value(1000));
    }
}
