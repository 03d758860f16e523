//! `OpenQASM` emitter for qlab circuits
//!
//! Remote backends accept circuits as `OpenQASM` source. This crate turns a
//! [`qlab_ir::Circuit`] into `OpenQASM` 3.0 (or 2.0 for tools that only read
//! the older dialect).
//!
//! # Example
//!
//! ```rust
//! use qlab_ir::Circuit;
//! use qlab_qasm3::emit;
//!
//! let mut circuit = Circuit::new("coin");
//! let q = circuit.add_qreg("q", 1);
//! let c = circuit.add_creg("c", 1);
//! circuit.h(q.get(0)?)?;
//! circuit.measure_register(&q, &c)?;
//!
//! let qasm = emit(&circuit)?;
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("c[0] = measure q[0];"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Angles equal to ±π, ±π/2 or ±π/4 are written symbolically, everything
//! else with six decimals.

mod emitter;
mod error;

pub use emitter::{emit, emit_qasm2};
pub use error::{EmitError, EmitResult};
