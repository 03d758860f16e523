//! Backend and execution errors.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    #[error("Backend not available: {0}")]
    Unavailable(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Submission rejected: {0}")]
    Submission(String),

    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Job was cancelled")]
    JobCancelled,

    #[error("No job with id {0}")]
    UnknownJob(String),

    /// Too wide for the device, or uses a gate it cannot run.
    #[error("Circuit cannot run here: {0}")]
    InvalidCircuit(String),

    #[error("Invalid shot count: {0}")]
    InvalidShots(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IBM Quantum is not connected; add credentials to the config file first")]
    RemoteNotInitialized,

    #[error("No operational device: {0}")]
    NoDeviceAvailable(String),

    #[error("Gave up waiting for job {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Anything else the remote service reported.
    #[error("Remote service error: {0}")]
    Remote(String),
}

pub type HalResult<T> = Result<T, HalError>;
