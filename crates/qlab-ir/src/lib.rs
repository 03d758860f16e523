//! Circuits for the qlab experiments.
//!
//! A [`Circuit`] is a set of named registers plus a dependency graph of
//! [`Operation`]s over their wires. Builder calls validate operands up
//! front, so an invalid circuit cannot be constructed.
//!
//! ```rust
//! use qlab_ir::Circuit;
//!
//! let mut circuit = Circuit::new("bell_state");
//! let q = circuit.add_qreg("q", 2);
//! let c = circuit.add_creg("c", 2);
//!
//! circuit.h(q.get(0)?)?.cx(q.get(0)?, q.get(1)?)?;
//! circuit.measure_register(&q, &c)?;
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! assert!(q.get(2).is_err());
//! # Ok::<(), qlab_ir::IrError>(())
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, Wire};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use operation::Operation;
pub use qubit::{ClassicalRegister, ClbitId, QuantumRegister, QubitId, Register};
