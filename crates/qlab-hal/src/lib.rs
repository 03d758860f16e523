//! qlab backend abstraction
//!
//! This crate connects circuits to the machines that run them:
//! - A common [`Backend`] trait: check, submit, poll, fetch counts
//! - [`Capabilities`] for qubit, shot and gate limits
//! - [`Counts`] and [`ExecutionResult`] for measurement outcomes
//! - [`QlabConfig`] for credentials and polling settings
//! - [`Executor`] to pick a backend and run a circuit to completion
//!
//! # Backends
//!
//! | Backend | Crate | Authentication |
//! |---------|-------|----------------|
//! | Local Simulator | `qlab-adapter-sim` | None |
//! | IBM Quantum | `qlab-adapter-ibm` | `ibm.key` in the config file, or `QLAB_IBM_TOKEN` |
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use std::sync::Arc;
//! use qlab_adapter_sim::SimulatorBackend;
//! use qlab_hal::{BackendSelector, Executor};
//! use qlab_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut circuit = Circuit::with_size("coin", 1, 1);
//!     circuit.h(qlab_ir::QubitId(0))?.measure_all()?;
//!
//!     let executor = Executor::new(Arc::new(SimulatorBackend::new()));
//!     let result = executor.run(BackendSelector::Simulator, &circuit, 1000).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod config;
pub mod error;
pub mod executor;
pub mod job;
pub mod result;

pub use backend::{Availability, Backend, PollPolicy};
pub use capability::Capabilities;
pub use config::{Credentials, ExecutionSettings, IbmSettings, ProxySettings, QlabConfig};
pub use error::{HalError, HalResult};
pub use executor::{
    BackendSelector, DeviceInfo, DeviceProvider, Executor, RemoteAccess, Target, least_busy,
};
pub use job::{JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
