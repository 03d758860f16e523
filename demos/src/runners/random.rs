//! Quantum random number generation.

use std::fmt;

use qlab_decode::{bits_to_int, outcome_bits, threshold_bits};
use qlab_hal::{Counts, Executor, Target};
use tracing::debug;

use crate::circuits::random::{
    DEFAULT_COUNT, DEFAULT_MAX, RANDOM_SHOTS, bit_count, qubits_for_bits, random_circuit,
};
use crate::error::DemoResult;

/// How counts become bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// One bit per outcome: `2^Q` bits, outcome `0` first.
    ///
    /// Values can exceed `max` since `2^Q` may be wider than `max` needs.
    #[default]
    Outcome,
    /// One bit per qubit, clbit `Q-1` most significant.
    Marginal,
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeMode::Outcome => write!(f, "outcome"),
            DecodeMode::Marginal => write!(f, "marginal"),
        }
    }
}

/// Generates random numbers, one circuit execution each.
#[derive(Debug, Clone)]
pub struct RandomNumberRunner {
    /// Largest value the caller asked for.
    pub max: u64,
    /// How many numbers to generate.
    pub count: usize,
    /// Shots per number.
    pub shots: u32,
    /// Decode mode.
    pub mode: DecodeMode,
}

impl Default for RandomNumberRunner {
    fn default() -> Self {
        Self {
            max: DEFAULT_MAX,
            count: DEFAULT_COUNT,
            shots: RANDOM_SHOTS,
            mode: DecodeMode::Outcome,
        }
    }
}

impl RandomNumberRunner {
    /// Create a runner for values up to `max`.
    pub fn new(max: u64) -> Self {
        Self {
            max,
            ..Self::default()
        }
    }

    /// Set how many numbers to generate.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the shots per number.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the decode mode.
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Qubits each circuit uses.
    pub fn num_qubits(&self) -> DemoResult<u32> {
        Ok(qubits_for_bits(bit_count(self.max)?))
    }

    /// Turn the counts of one execution into a number.
    pub fn decode(&self, counts: &Counts, shots: u32, num_qubits: u32) -> DemoResult<u64> {
        let width = num_qubits as usize;
        let bits = match self.mode {
            DecodeMode::Outcome => outcome_bits(counts, u64::from(shots), width)?,
            DecodeMode::Marginal => {
                let mut bits = threshold_bits(counts, u64::from(shots), width)?;
                bits.reverse();
                bits
            }
        };
        Ok(bits_to_int(&bits)?)
    }

    /// Generate `count` numbers on `target`.
    pub async fn run(&self, executor: &Executor, target: &Target) -> DemoResult<Vec<u64>> {
        let num_qubits = self.num_qubits()?;

        let circuit = random_circuit(num_qubits)?;
        let mut values = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let result = executor.execute(target, &circuit, self.shots).await?;
            let value = self.decode(&result.counts, result.shots, num_qubits)?;
            debug!(index = i, value, "random value");
            values.push(value);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_ish() -> Counts {
        Counts::from_pairs([("00", 260), ("01", 240), ("10", 245), ("11", 255)])
    }

    #[test]
    fn test_num_qubits() {
        assert_eq!(RandomNumberRunner::new(100).num_qubits().unwrap(), 3);
        assert_eq!(RandomNumberRunner::new(10).num_qubits().unwrap(), 2);
        assert_eq!(RandomNumberRunner::new(1).num_qubits().unwrap(), 1);
        assert!(RandomNumberRunner::new(0).num_qubits().is_err());
    }

    #[test]
    fn test_outcome_decode() {
        // bits [1, 0, 0, 1]
        let runner = RandomNumberRunner::new(10);
        assert_eq!(runner.decode(&uniform_ish(), 1000, 2).unwrap(), 9);
    }

    #[test]
    fn test_marginal_decode() {
        // bit0 = 495, bit1 = 500, both above 250
        let runner = RandomNumberRunner::new(10).with_mode(DecodeMode::Marginal);
        assert_eq!(runner.decode(&uniform_ish(), 1000, 2).unwrap(), 3);

        let skewed = Counts::from_pairs([("10", 1000)]);
        assert_eq!(runner.decode(&skewed, 1000, 2).unwrap(), 2);
    }

    #[test]
    fn test_builder() {
        let runner = RandomNumberRunner::new(50).with_count(3).with_shots(64);
        assert_eq!((runner.max, runner.count, runner.shots), (50, 3, 64));
        assert_eq!(runner.mode, DecodeMode::Outcome);
    }
}
