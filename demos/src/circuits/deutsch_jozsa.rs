//! Deutsch-Jozsa: decide with one query whether an oracle is constant or
//! balanced.

use std::fmt;

use qlab_ir::{Circuit, IrResult};

/// Input width used by the experiment.
pub const DEFAULT_INPUTS: u32 = 3;
/// Shots for the Deutsch-Jozsa run.
pub const DEUTSCH_JOZSA_SHOTS: u32 = 100;

/// The oracle hidden inside the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
    /// Returns the same value for every input; `true` means it returns 1.
    Constant(bool),
    /// Returns 0 for half the inputs and 1 for the other half.
    Balanced,
}

impl Oracle {
    /// Pick an oracle uniformly at random.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Oracle::Constant(rng.gen_bool(0.5))
        } else {
            Oracle::Balanced
        }
    }

    /// Whether this oracle is constant.
    pub fn is_constant(self) -> bool {
        matches!(self, Oracle::Constant(_))
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Oracle::Constant(_) => write!(f, "constant"),
            Oracle::Balanced => write!(f, "balanced"),
        }
    }
}

/// Build the Deutsch-Jozsa circuit for `n` input qubits.
///
/// Qubit `n` is the answer qubit, prepared in `|−⟩`. The balanced oracle
/// applies `cx(i, n)` for every set bit `i` of `n`. Only the inputs are
/// measured, so keys are `n` characters wide.
pub fn deutsch_jozsa_circuit(n: u32, oracle: Oracle) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("deutsch_jozsa");
    let q = circuit.add_qreg("q", n + 1);
    let c = circuit.add_creg("c", n);
    let answer = q.get(n)?;

    for i in 0..n {
        circuit.h(q.get(i)?)?;
    }
    circuit.x(answer)?.h(answer)?;
    circuit.barrier_all()?;

    match oracle {
        Oracle::Constant(true) => {
            circuit.x(answer)?;
        }
        Oracle::Constant(false) => {
            circuit.id(answer)?;
        }
        Oracle::Balanced => {
            for i in (0..n).filter(|i| n & (1 << i) != 0) {
                circuit.cx(q.get(i)?, answer)?;
            }
        }
    }
    circuit.barrier_all()?;

    for i in 0..n {
        circuit.h(q.get(i)?)?;
    }
    circuit.barrier_all()?;

    for i in 0..n {
        circuit.measure(q.get(i)?, c.get(i)?)?;
    }
    Ok(circuit)
}
