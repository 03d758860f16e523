//! IBM Quantum backend adapter for qlab.
//!
//! Connects to IBM Quantum devices through the Qiskit Runtime REST API.
//!
//! # Authentication
//!
//! Credentials come from [`qlab_hal::QlabConfig`]:
//!
//! ```yaml
//! ibm:
//!   key: "<api key or token>"
//!   service_crn: "crn:v1:bluemix:public:quantum-computing:..."  # optional
//!   proxies:
//!     https: "http://proxy.local:3128"
//!   verify: true
//! ```
//!
//! With a `service_crn` the key is exchanged for an IAM token against the
//! IBM Cloud API. Without one it is sent as a bearer token to the legacy
//! endpoint (or `ibm.endpoint` when set).
//!
//! # Example
//!
//! ```ignore
//! use qlab_adapter_ibm::IbmProvider;
//! use qlab_hal::{Executor, QlabConfig, RemoteAccess};
//!
//! let credentials = QlabConfig::load(None)?.credentials()?;
//! let provider = IbmProvider::connect(&credentials).await?;
//! let executor = Executor::new(local).with_remote(RemoteAccess::new(Arc::new(provider)));
//! ```

pub mod api;
pub mod backend;
pub mod error;
pub mod provider;
mod readout;

pub use backend::IbmBackend;
pub use error::{IbmError, IbmResult};
pub use provider::IbmProvider;
