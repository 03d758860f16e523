//! qlab local statevector simulator
//!
//! Runs circuits in-process with an exact statevector, then samples
//! measurement outcomes. Memory grows as 2^n, which keeps the practical
//! limit around 20 qubits.
//!
//! # Features
//!
//! - **All builder gates**: every gate `qlab-ir` can produce
//! - **Measurement collapse**: measurements and resets in the middle of a
//!   circuit are simulated shot by shot
//! - **Fast sampling**: circuits that only measure at the end evolve the
//!   state once and sample every shot from it
//! - **Reproducible**: [`SimulatorBackend::with_seed`] fixes the sampler
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! Count keys follow the usual convention: one character per classical bit,
//! classical bit 0 rightmost, unwritten bits read `0`.
//!
//! # Example
//!
//! ```ignore
//! use qlab_adapter_sim::SimulatorBackend;
//! use qlab_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("Results: {:?}", result.counts);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
