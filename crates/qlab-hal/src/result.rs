//! Execution result types.
//!
//! Bitstring ordering: the rightmost character is classical bit 0. The key
//! `"01"` means bit 0 read `1` and bit 1 read `0`. Every key of a result has
//! exactly as many characters as the circuit has classical bits.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts from circuit execution.
///
/// Maps bitstrings to occurrence counts. Iteration yields bitstrings in the
/// order they were first inserted, which is the order the backend reported
/// them. Decoders that break ties by "first seen" rely on this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, u64)>", into = "Vec<(String, u64)>")]
pub struct Counts {
    entries: Vec<(String, u64)>,
    index: FxHashMap<String, usize>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from an iterator of (bitstring, count) pairs.
    /// Duplicate bitstrings are accumulated, consistent with `insert()`.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add `count` occurrences of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        let key = bitstring.into();
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 += count;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, count));
        }
    }

    /// Get the count for a bitstring. Absent bitstrings count as zero.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.index
            .get(bitstring)
            .map_or(0, |&pos| self.entries[pos].1)
    }

    /// Iterate over (bitstring, count) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterate over the bitstrings in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Get the total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Get the most frequent bitstring.
    ///
    /// Ties go to the bitstring seen first.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (key, count) in self.iter() {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }

    /// Get probabilities for each bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / total))
            .collect()
    }

    /// Get counts sorted by count, descending. Equal counts keep first-seen order.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut items: Vec<_> = self.iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    /// Get the number of unique bitstrings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if counts are empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl From<Vec<(String, u64)>> for Counts {
    fn from(pairs: Vec<(String, u64)>) -> Self {
        Self::from_pairs(pairs)
    }
}

impl From<Counts> for Vec<(String, u64)> {
    fn from(counts: Counts) -> Self {
        counts.entries
    }
}

/// Formats as `{'00': 512, '11': 512}` in insertion order.
impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{key}': {count}")?;
        }
        f.write_str("}")
    }
}

/// Result of circuit execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    /// Name of the backend that produced the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// Additional metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
            backend: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }

    /// Set the backend name.
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Set metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get probabilities for each bitstring.
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        self.counts.probabilities()
    }

    /// Get the most frequent measurement result with its probability.
    #[allow(clippy::cast_precision_loss)]
    pub fn most_frequent(&self) -> Option<(&str, f64)> {
        let total = self.counts.total_shots();
        if total == 0 {
            return None;
        }
        self.counts
            .most_frequent()
            .map(|(k, v)| (k, v as f64 / total as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("00", 500);
        counts.insert("11", 480);
        counts.insert("00", 20);

        assert_eq!(counts.get("00"), 520);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_preserve_insertion_order() {
        let counts = Counts::from_pairs([("11", 1), ("00", 5), ("10", 3), ("00", 1)]);
        let keys: Vec<_> = counts.keys().collect();
        assert_eq!(keys, ["11", "00", "10"]);
    }

    #[test]
    fn test_most_frequent_first_seen_wins_ties() {
        let counts = Counts::from_pairs([("01", 50), ("10", 50), ("00", 10)]);
        assert_eq!(counts.most_frequent(), Some(("01", 50)));

        let counts = Counts::from_pairs([("10", 50), ("01", 50)]);
        assert_eq!(counts.most_frequent(), Some(("10", 50)));

        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_counts_display() {
        let counts = Counts::from_pairs([("11", 3), ("00", 5)]);
        assert_eq!(counts.to_string(), "{'11': 3, '00': 5}");
        assert_eq!(Counts::new().to_string(), "{}");
    }

    #[test]
    fn test_sorted_is_stable() {
        let counts = Counts::from_pairs([("a", 1), ("b", 3), ("c", 1), ("d", 3)]);
        let sorted: Vec<_> = counts.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(sorted, ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_probabilities() {
        let counts = Counts::from_pairs([("0", 250), ("1", 750)]);
        let probs = counts.probabilities();
        assert!((probs["0"] - 0.25).abs() < 1e-12);
        assert!((probs["1"] - 0.75).abs() < 1e-12);
        assert!(Counts::new().probabilities().is_empty());
    }

    #[test]
    fn test_counts_serde_keeps_order() {
        let counts = Counts::from_pairs([("10", 3), ("01", 7)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"[["10",3],["01",7]]"#);

        let back: Counts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }

    #[test]
    fn test_execution_result_most_frequent() {
        let result = ExecutionResult::new(Counts::from_pairs([("0", 25), ("1", 75)]), 100)
            .with_backend("simulator")
            .with_execution_time(3);
        let (bits, p) = result.most_frequent().unwrap();
        assert_eq!(bits, "1");
        assert!((p - 0.75).abs() < 1e-12);
        assert_eq!(result.backend.as_deref(), Some("simulator"));
    }
}
