//! Outcome vocabulary configuration
//!
//! Maps the outcome codes found in the source data onto the closed
//! [`Outcome`] variant. Codes are matched trimmed and case-insensitively.

use crate::error::{LedgerError, Result};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Code -> outcome table used at ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeVocabulary {
    pub vocabulary: BTreeMap<String, Outcome>,
}

impl Default for OutcomeVocabulary {
    /// Spellings produced by the fight-statistics crawl. Draw and no-contest
    /// rows carry the result text of both fighters concatenated.
    fn default() -> Self {
        let vocabulary = [
            ("win", Outcome::AWin),
            ("loss", Outcome::BWin),
            ("draw", Outcome::Draw),
            ("drawdraw", Outcome::Draw),
            ("nc", Outcome::NoContest),
            ("ncnc", Outcome::NoContest),
        ]
        .into_iter()
        .map(|(code, outcome)| (code.to_string(), outcome))
        .collect();

        Self { vocabulary }
    }
}

impl OutcomeVocabulary {
    /// Build a vocabulary from explicit code/outcome pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Outcome)>,
        S: Into<String>,
    {
        Self {
            vocabulary: pairs
                .into_iter()
                .map(|(code, outcome)| (code.into(), outcome))
                .collect(),
        }
    }

    /// Resolve a source code, or `None` if it is not in the vocabulary
    pub fn resolve(&self, code: &str) -> Option<Outcome> {
        let normalized = normalize_code(code);
        self.vocabulary
            .iter()
            .find(|(known, _)| normalize_code(known) == normalized)
            .map(|(_, outcome)| *outcome)
    }

    /// Validate that codes are non-empty and unambiguous once normalized
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(LedgerError::ConfigurationError {
                message: "Outcome vocabulary cannot be empty".to_string(),
            }
            .into());
        }

        let mut seen: BTreeMap<String, (&str, Outcome)> = BTreeMap::new();
        for (code, outcome) in &self.vocabulary {
            let normalized = normalize_code(code);
            if normalized.is_empty() {
                return Err(LedgerError::ConfigurationError {
                    message: "Outcome codes cannot be blank".to_string(),
                }
                .into());
            }

            if let Some((previous, previous_outcome)) = seen.get(&normalized) {
                if *previous_outcome != *outcome {
                    return Err(LedgerError::ConfigurationError {
                        message: format!(
                            "Outcome codes {:?} and {:?} collide but map to {} and {}",
                            previous, code, previous_outcome, outcome
                        ),
                    }
                    .into());
                }
            }
            seen.insert(normalized, (code.as_str(), *outcome));
        }

        Ok(())
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = OutcomeVocabulary::default();
        assert!(vocabulary.validate().is_ok());

        assert_eq!(vocabulary.resolve("win"), Some(Outcome::AWin));
        assert_eq!(vocabulary.resolve("loss"), Some(Outcome::BWin));
        assert_eq!(vocabulary.resolve("drawdraw"), Some(Outcome::Draw));
        assert_eq!(vocabulary.resolve("ncnc"), Some(Outcome::NoContest));
        assert_eq!(vocabulary.resolve("nc"), Some(Outcome::NoContest));
    }

    #[test]
    fn test_resolution_is_trimmed_and_case_insensitive() {
        let vocabulary = OutcomeVocabulary::default();
        assert_eq!(vocabulary.resolve("  WIN "), Some(Outcome::AWin));
        assert_eq!(vocabulary.resolve("NcNc"), Some(Outcome::NoContest));
    }

    #[test]
    fn test_unknown_codes_do_not_resolve() {
        let vocabulary = OutcomeVocabulary::default();
        assert_eq!(vocabulary.resolve(""), None);
        assert_eq!(vocabulary.resolve("dq"), None);
        assert_eq!(vocabulary.resolve("drawnc"), None);
    }

    #[test]
    fn test_conflicting_codes_rejected() {
        let vocabulary =
            OutcomeVocabulary::from_pairs([("W", Outcome::AWin), ("w", Outcome::BWin)]);
        let err = vocabulary.validate().unwrap_err();
        assert!(err.to_string().contains("collide"));
    }

    #[test]
    fn test_blank_and_empty_vocabulary_rejected() {
        assert!(OutcomeVocabulary::from_pairs([("  ", Outcome::Draw)])
            .validate()
            .is_err());
        assert!(OutcomeVocabulary::from_pairs(Vec::<(String, Outcome)>::new())
            .validate()
            .is_err());
    }
}
