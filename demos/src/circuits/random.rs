//! Sizing and circuit for the quantum random number generator.
//!
//! `Q` qubits in uniform superposition give `2^Q` outcomes, and the outcome
//! decode turns each of them into one random bit. A value up to `max` needs
//! `floor(log2(max)) + 1` bits, so `Q = ceil(log2(bits))`.

use qlab_ir::{Circuit, IrResult};

use crate::error::{DemoError, DemoResult};

/// Shots per generated number.
pub const RANDOM_SHOTS: u32 = 1000;
/// Default upper bound.
pub const DEFAULT_MAX: u64 = 100;
/// Default number of values to generate.
pub const DEFAULT_COUNT: usize = 500;

/// Number of bits needed to write `max` in binary.
pub fn bit_count(max: u64) -> DemoResult<u32> {
    if max == 0 {
        return Err(DemoError::InvalidArgument(
            "the maximum random value must be at least 1".into(),
        ));
    }
    Ok(u64::BITS - max.leading_zeros())
}

/// Qubits whose `2^Q` outcomes cover `bits` output bits, at least one.
pub fn qubits_for_bits(bits: u32) -> u32 {
    if bits <= 1 {
        1
    } else {
        u32::BITS - (bits - 1).leading_zeros()
    }
}

/// Hadamard on every qubit, then measure them all.
pub fn random_circuit(num_qubits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("random_number");
    let q = circuit.add_qreg("q", num_qubits);
    let c = circuit.add_creg("c", num_qubits);
    circuit.h_all(&q)?;
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_count() {
        assert_eq!(bit_count(1).unwrap(), 1);
        assert_eq!(bit_count(10).unwrap(), 4);
        assert_eq!(bit_count(100).unwrap(), 7);
        assert_eq!(bit_count(255).unwrap(), 8);
        assert_eq!(bit_count(256).unwrap(), 9);
        assert!(bit_count(0).is_err());
    }

    #[test]
    fn test_qubits_for_bits() {
        assert_eq!(qubits_for_bits(1), 1);
        assert_eq!(qubits_for_bits(2), 1);
        assert_eq!(qubits_for_bits(4), 2);
        assert_eq!(qubits_for_bits(7), 3);
        assert_eq!(qubits_for_bits(8), 3);
        assert_eq!(qubits_for_bits(9), 4);
    }

    #[test]
    fn test_random_circuit() {
        let circuit = random_circuit(3).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.dag().num_ops(), 4);
    }
}
