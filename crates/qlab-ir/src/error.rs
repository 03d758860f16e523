//! Circuit construction errors.

use thiserror::Error;

use crate::dag::Wire;

/// Why an operation or register access was refused.
///
/// A refused operation never reaches the circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("'{op}' uses {wire}, which is not part of the circuit")]
    UnknownWire { op: &'static str, wire: Wire },

    #[error("'{op}' uses {wire} more than once")]
    RepeatedWire { op: &'static str, wire: Wire },

    #[error("'{gate}' acts on {expected} qubit(s), got {got}")]
    Arity {
        gate: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Index {index} out of range for register '{register}' of size {size}")]
    RegisterIndexOutOfRange {
        register: String,
        index: u32,
        size: u32,
    },

    #[error("Cannot measure register '{qreg}' ({qsize} qubits) into '{creg}' ({csize} bits)")]
    RegisterSizeMismatch {
        qreg: String,
        qsize: u32,
        creg: String,
        csize: u32,
    },
}

/// Result type for circuit construction.
pub type IrResult<T> = Result<T, IrError>;
