//! Four-qubit Grover search for a hidden password.

use std::f64::consts::FRAC_PI_4;

use qlab_ir::{Circuit, IrResult, QuantumRegister};

use crate::error::{DemoError, DemoResult};

/// Password width in bits.
pub const PASSWORD_BITS: u32 = 4;
/// Shots per search attempt.
pub const SEARCH_SHOTS: u32 = 100;

/// A four-bit password, bit 0 least significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Password(u8);

impl Password {
    /// Create a password from its value, `0..16`.
    pub fn new(value: u8) -> DemoResult<Self> {
        if value >= 1 << PASSWORD_BITS {
            return Err(DemoError::InvalidArgument(format!(
                "password {value} does not fit in {PASSWORD_BITS} bits"
            )));
        }
        Ok(Self(value))
    }

    /// Draw a password uniformly at random.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..1 << PASSWORD_BITS))
    }

    /// Bit `i` of the password.
    pub fn bit(self, i: u32) -> bool {
        (self.0 >> i) & 1 == 1
    }

    /// The bitstring the measurement should produce, `b3 b2 b1 b0`.
    pub fn bitstring(self) -> String {
        format!("{:04b}", self.0)
    }
}

/// Flip every qubit whose password bit is 0, so the password maps to `1111`.
fn oracle(circuit: &mut Circuit, q: &QuantumRegister, password: Password) -> IrResult<()> {
    for i in 0..PASSWORD_BITS {
        if !password.bit(i) {
            circuit.x(q.get(i)?)?;
        }
    }
    Ok(())
}

/// Phase flip of `|1111⟩` from controlled phases of ±π/4 and `cx`.
fn controlled_controlled_controlled_z(circuit: &mut Circuit, q: &QuantumRegister) -> IrResult<()> {
    let (q0, q1, q2, q3) = (q.get(0)?, q.get(1)?, q.get(2)?, q.get(3)?);
    circuit
        .cu1(FRAC_PI_4, q0, q3)?
        .cx(q0, q1)?
        .cu1(-FRAC_PI_4, q1, q3)?
        .cx(q0, q1)?
        .cu1(FRAC_PI_4, q1, q3)?
        .cx(q1, q2)?
        .cu1(-FRAC_PI_4, q2, q3)?
        .cx(q0, q2)?
        .cu1(FRAC_PI_4, q2, q3)?
        .cx(q1, q2)?
        .cu1(-FRAC_PI_4, q2, q3)?
        .cx(q0, q2)?
        .cu1(FRAC_PI_4, q2, q3)?;
    Ok(())
}

/// One Grover iteration marking `password`, then measure all four qubits.
pub fn password_search_circuit(password: Password) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("password_search");
    let q = circuit.add_qreg("q", PASSWORD_BITS);
    let c = circuit.add_creg("c", PASSWORD_BITS);

    circuit.h_all(&q)?;

    oracle(&mut circuit, &q, password)?;
    controlled_controlled_controlled_z(&mut circuit, &q)?;
    oracle(&mut circuit, &q, password)?;

    // Inversion about the mean.
    circuit.h_all(&q)?.x_all(&q)?;
    controlled_controlled_controlled_z(&mut circuit, &q)?;
    circuit.x_all(&q)?.h_all(&q)?;

    circuit.barrier(q.iter())?;
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_bitstring_is_msb_first() {
        let password = Password::new(0b0110).unwrap();
        assert_eq!(password.bitstring(), "0110");
        assert!(!password.bit(0));
        assert!(password.bit(1));
    }

    #[test]
    fn test_password_range() {
        assert!(Password::new(15).is_ok());
        assert!(Password::new(16).is_err());
    }

    #[test]
    fn test_oracle_flips_zero_bits() {
        // 0b0110 has zeros at bits 0 and 3: two x gates per oracle call.
        let circuit = password_search_circuit(Password::new(0b0110).unwrap()).unwrap();
        let all_ones = password_search_circuit(Password::new(0b1111).unwrap()).unwrap();
        assert_eq!(circuit.dag().num_ops(), all_ones.dag().num_ops() + 4);
    }

    #[test]
    fn test_circuit_shape() {
        let circuit = password_search_circuit(Password::new(0b1111).unwrap()).unwrap();
        // 4 h, 13 cccz, 4 h, 4 x, 13 cccz, 4 x, 4 h, barrier, measure
        assert_eq!(circuit.dag().num_ops(), 4 + 13 + 4 + 4 + 13 + 4 + 4 + 1 + 1);
        assert_eq!(circuit.num_clbits(), 4);
    }
}
