//! Error types for decoding.

use thiserror::Error;

/// Errors that can occur while interpreting counts.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A single-shot decode saw zero or several outcomes.
    #[error("Expected exactly one outcome, found {found}")]
    NotSingleOutcome {
        /// Number of distinct bitstrings in the counts.
        found: usize,
    },

    /// A key contains something other than `0` and `1`.
    #[error("Invalid bitstring '{0}'")]
    InvalidBitstring(String),

    /// A key does not have the expected number of bits.
    #[error("Bitstring '{key}' has {actual} bits, expected {expected}")]
    WidthMismatch {
        /// Offending key.
        key: String,
        /// Expected width.
        expected: usize,
        /// Actual width.
        actual: usize,
    },

    /// The requested width cannot be represented.
    #[error("Cannot decode {num_bits} bits (limit {limit})")]
    TooManyBits {
        /// Requested width.
        num_bits: usize,
        /// Largest supported width.
        limit: usize,
    },
}

/// Result type for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
