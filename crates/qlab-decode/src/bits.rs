//! Threshold decoders that turn counts into bit vectors.
//!
//! Both decoders compare a count against the share every outcome would get
//! under a uniform distribution, `shots / 2^Q`, and emit `1` only when the
//! count is strictly greater. The comparison is done in integers
//! (`count * 2^Q > shots`) so equality is exact.

use qlab_hal::Counts;

use crate::error::{DecodeError, DecodeResult};

/// Widest register [`threshold_bits`] accepts.
pub const MAX_THRESHOLD_BITS: usize = 63;
/// Widest register [`outcome_bits`] accepts; it produces `2^Q` bits.
pub const MAX_OUTCOME_BITS: usize = 16;

fn check_width(num_bits: usize, limit: usize) -> DecodeResult<()> {
    if num_bits > limit {
        return Err(DecodeError::TooManyBits { num_bits, limit });
    }
    Ok(())
}

/// Validate a key and return its bits, clbit 0 first.
fn key_bits(key: &str, num_bits: usize) -> DecodeResult<impl Iterator<Item = bool> + '_> {
    if key.len() != num_bits {
        return Err(DecodeError::WidthMismatch {
            key: key.to_string(),
            expected: num_bits,
            actual: key.len(),
        });
    }
    if !key.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(DecodeError::InvalidBitstring(key.to_string()));
    }
    Ok(key.bytes().rev().map(|b| b == b'1'))
}

fn above_uniform_share(count: u64, shots: u64, num_bits: usize) -> bool {
    u128::from(count) << num_bits > u128::from(shots)
}

/// Per-qubit threshold decode.
///
/// For every bit position `i` (clbit `i`, the `i`-th character from the
/// right) the marginal count of keys with a `1` there is compared against
/// `shots / 2^Q`. Element `i` of the result belongs to clbit `i`. Keys absent
/// from `counts` contribute nothing.
pub fn threshold_bits(counts: &Counts, shots: u64, num_bits: usize) -> DecodeResult<Vec<u8>> {
    check_width(num_bits, MAX_THRESHOLD_BITS)?;

    let mut marginals = vec![0_u64; num_bits];
    for (key, count) in counts.iter() {
        for (position, set) in key_bits(key, num_bits)?.enumerate() {
            if set {
                marginals[position] += count;
            }
        }
    }

    Ok(marginals
        .into_iter()
        .map(|m| u8::from(above_uniform_share(m, shots, num_bits)))
        .collect())
}

/// Per-outcome threshold decode.
///
/// Produces `2^Q` bits: element `k` is `1` when outcome `k` (the key whose
/// binary value is `k`) was counted more than `shots / 2^Q` times. Outcomes
/// that never occurred give `0`.
pub fn outcome_bits(counts: &Counts, shots: u64, num_bits: usize) -> DecodeResult<Vec<u8>> {
    check_width(num_bits, MAX_OUTCOME_BITS)?;

    let mut per_outcome = vec![0_u64; 1 << num_bits];
    for (key, count) in counts.iter() {
        let value = key_bits(key, num_bits)?
            .enumerate()
            .fold(0_usize, |acc, (i, set)| acc | (usize::from(set) << i));
        per_outcome[value] += count;
    }

    Ok(per_outcome
        .into_iter()
        .map(|c| u8::from(above_uniform_share(c, shots, num_bits)))
        .collect())
}

/// Interpret bits as an unsigned integer, most significant bit first.
///
/// Any non-zero element counts as a set bit.
pub fn bits_to_int(bits: &[u8]) -> DecodeResult<u64> {
    check_width(bits.len(), 64)?;
    Ok(bits
        .iter()
        .fold(0_u64, |acc, &bit| (acc << 1) | u64::from(bit != 0)))
}
