//! Sampler output to [`Counts`].
//!
//! Keys come out the way the local simulator writes them: one character per
//! classical bit, bit 0 last. V2 samples keep the order they were first seen
//! in; V1 counts and quasi-distributions are sorted by key.

use qlab_hal::Counts;

use crate::api::{PubResult, SamplerResults};

/// Register the emitter declares.
const REGISTER: &str = "c";

/// Shots assumed for a quasi-distribution without `metadata.shots`.
const FALLBACK_SHOTS: f64 = 1024.0;

/// Counts of the first circuit in `results`.
///
/// `width` is the submitted circuit's classical width. When unknown, V2
/// keys are as wide as the largest sample and V1 keys four bits per digit.
pub fn counts(results: &SamplerResults, width: Option<usize>) -> Counts {
    let Some(first) = results.results.first() else {
        return Counts::new();
    };
    if let Some(samples) = sample_list(first) {
        let width = width.unwrap_or_else(|| widest(samples));
        let mut counts = Counts::new();
        for sample in samples {
            counts.insert(to_key(sample, width), 1);
        }
        return counts;
    }

    let width = width.unwrap_or(0);
    let mut pairs: Vec<(String, u64)> = if let Some(raw) = &first.counts {
        raw.iter().map(|(k, &n)| (to_key(k, width), n)).collect()
    } else if let Some(dist) = first.quasi_dists.as_ref().and_then(|d| d.first()) {
        let shots = first
            .metadata
            .as_ref()
            .and_then(|m| m.get("shots"))
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(FALLBACK_SHOTS);
        dist.iter()
            .map(|(k, &p)| (to_key(k, width), (p * shots).round().max(0.0) as u64))
            .filter(|&(_, n)| n > 0)
            .collect()
    } else {
        Vec::new()
    };
    pairs.sort();
    Counts::from(pairs)
}

fn sample_list(result: &PubResult) -> Option<&[String]> {
    let data = result.data.as_ref()?;
    let register = data.get(REGISTER).or_else(|| data.values().next())?;
    Some(&register.samples)
}

fn parse_hex(raw: &str) -> Option<u64> {
    u64::from_str_radix(raw.strip_prefix("0x").unwrap_or(raw), 16).ok()
}

/// Bits needed for the largest sample; at least one.
fn widest(samples: &[String]) -> usize {
    let max = samples.iter().filter_map(|s| parse_hex(s)).max().unwrap_or(0);
    (u64::BITS - max.leading_zeros()).max(1) as usize
}

/// `0x`-prefixed or bare hex to a binary key `width` wide.
///
/// Bare strings of only `0`/`1` are already keys. Width 0 means four bits
/// per hex digit. Anything unparseable is returned unchanged.
fn to_key(raw: &str, width: usize) -> String {
    let digits = match raw.strip_prefix("0x") {
        Some(digits) => digits,
        None if !raw.is_empty() && raw.bytes().all(|b| matches!(b, b'0' | b'1')) => {
            return raw.to_owned();
        }
        None => raw,
    };
    let Some(value) = parse_hex(digits) else {
        return raw.to_owned();
    };
    let width = if width == 0 { digits.len() * 4 } else { width };
    format!("{value:0width$b}")
}
