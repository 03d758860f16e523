//! Operations placed on circuit wires.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// One step of a circuit.
///
/// Operands live inside the variant, so a measurement always pairs every
/// qubit with exactly one classical bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    Gate { gate: Gate, qubits: Vec<QubitId> },
    /// Readout of each qubit into its paired classical bit.
    Measure { pairs: Vec<(QubitId, ClbitId)> },
    Reset { qubit: QubitId },
    /// Scheduling fence; has no effect on the state.
    Barrier { qubits: Vec<QubitId> },
}

impl Operation {
    pub fn gate(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Operation::Gate {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    pub fn measure(pairs: impl IntoIterator<Item = (QubitId, ClbitId)>) -> Self {
        Operation::Measure {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// Mnemonic used in listings and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Gate { gate, .. } => gate.name(),
            Operation::Measure { .. } => "measure",
            Operation::Reset { .. } => "reset",
            Operation::Barrier { .. } => "barrier",
        }
    }

    /// Qubits touched, in operand order.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate { qubits, .. } | Operation::Barrier { qubits } => qubits.clone(),
            Operation::Measure { pairs } => pairs.iter().map(|(q, _)| *q).collect(),
            Operation::Reset { qubit } => vec![*qubit],
        }
    }

    /// Classical bits written.
    pub fn clbits(&self) -> Vec<ClbitId> {
        match self {
            Operation::Measure { pairs } => pairs.iter().map(|(_, c)| *c).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }
}
