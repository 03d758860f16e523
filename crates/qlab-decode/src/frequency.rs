//! Decoders that read a single key or the most frequent one.

use qlab_hal::Counts;

use crate::error::{DecodeError, DecodeResult};

/// The only outcome of a single-shot run.
pub fn single_outcome(counts: &Counts) -> DecodeResult<&str> {
    let mut keys = counts.keys();
    match (keys.next(), keys.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(DecodeError::NotSingleOutcome {
            found: counts.len(),
        }),
    }
}

/// The outcome with the highest count. Ties go to the key seen first.
pub fn majority(counts: &Counts) -> Option<(&str, u64)> {
    counts.most_frequent()
}

/// The raw count for `key`, zero when the key never occurred.
pub fn magnitude(counts: &Counts, key: &str) -> u64 {
    counts.get(key)
}

/// Verdict of a Deutsch-Jozsa run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleVerdict {
    /// The oracle returns the same value for every input.
    Constant,
    /// The oracle returns 0 for half the inputs and 1 for the other half.
    Balanced,
}

impl OracleVerdict {
    /// Classify counts by their majority outcome: all zeros means constant.
    pub fn from_counts(counts: &Counts) -> Option<Self> {
        majority(counts).map(|(key, _)| {
            if key.chars().all(|c| c == '0') {
                OracleVerdict::Constant
            } else {
                OracleVerdict::Balanced
            }
        })
    }
}

impl std::fmt::Display for OracleVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleVerdict::Constant => write!(f, "constant"),
            OracleVerdict::Balanced => write!(f, "balanced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_outcome() {
        let counts = Counts::from_pairs([("101", 1)]);
        assert_eq!(single_outcome(&counts), Ok("101"));

        let empty = Counts::new();
        assert_eq!(
            single_outcome(&empty),
            Err(DecodeError::NotSingleOutcome { found: 0 })
        );

        let two = Counts::from_pairs([("0", 1), ("1", 1)]);
        assert_eq!(
            single_outcome(&two),
            Err(DecodeError::NotSingleOutcome { found: 2 })
        );
    }

    #[test]
    fn test_majority_ties_go_to_first_seen() {
        let counts = Counts::from_pairs([("0110", 40), ("0111", 40), ("0000", 20)]);
        assert_eq!(majority(&counts), Some(("0110", 40)));
        assert_eq!(majority(&Counts::new()), None);
    }

    #[test]
    fn test_magnitude() {
        let counts = Counts::from_pairs([("1", 850), ("0", 150)]);
        assert_eq!(magnitude(&counts, "1"), 850);
        assert_eq!(magnitude(&Counts::from_pairs([("0", 1000)]), "1"), 0);
    }

    #[test]
    fn test_oracle_verdict() {
        let constant = Counts::from_pairs([("000", 100)]);
        assert_eq!(
            OracleVerdict::from_counts(&constant),
            Some(OracleVerdict::Constant)
        );

        let balanced = Counts::from_pairs([("011", 97), ("000", 3)]);
        assert_eq!(
            OracleVerdict::from_counts(&balanced),
            Some(OracleVerdict::Balanced)
        );
        assert_eq!(OracleVerdict::from_counts(&Counts::new()), None);
    }
}
