//! Interpreters for measurement counts
//!
//! Every experiment ends by turning a [`qlab_hal::Counts`] into something a
//! person can read. The decoders here are pure functions over counts, plus
//! one async retry loop for the password search.
//!
//! | Decoder | Input | Output |
//! |---------|-------|--------|
//! | [`eight_ball`] | one shot, three bits | [`EightBallAnswer`] |
//! | [`threshold_bits`] | Q-bit counts | Q bits, clbit 0 first |
//! | [`outcome_bits`] | Q-bit counts | 2^Q bits, outcome 0 first |
//! | [`majority`] | any counts | most frequent key, first seen on ties |
//! | [`magnitude`] | any counts | count of one key |
//! | [`PasswordSearch`] | repeated runs | [`SearchOutcome`] |
//!
//! # Example
//!
//! ```rust
//! use qlab_decode::{bits_to_int, outcome_bits};
//! use qlab_hal::Counts;
//!
//! let counts = Counts::from_pairs([("00", 260), ("01", 240), ("10", 245), ("11", 255)]);
//! let bits = outcome_bits(&counts, 1000, 2)?;
//! assert_eq!(bits, [1, 0, 0, 1]);
//! assert_eq!(bits_to_int(&bits)?, 9);
//! # Ok::<(), qlab_decode::DecodeError>(())
//! ```

pub mod bits;
pub mod eight_ball;
pub mod error;
pub mod frequency;
pub mod search;

pub use bits::{MAX_OUTCOME_BITS, MAX_THRESHOLD_BITS, bits_to_int, outcome_bits, threshold_bits};
pub use eight_ball::{EightBallAnswer, eight_ball};
pub use error::{DecodeError, DecodeResult};
pub use frequency::{OracleVerdict, magnitude, majority, single_outcome};
pub use search::{DEFAULT_MAX_ATTEMPTS, PasswordSearch, SearchOutcome};
