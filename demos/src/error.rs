//! Error type shared by the experiments.

use qlab_decode::DecodeError;
use qlab_hal::HalError;
use qlab_ir::IrError;
use thiserror::Error;

/// Result type for experiment runs.
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors raised while building, running or interpreting an experiment.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Circuit construction failed.
    #[error(transparent)]
    Circuit(#[from] IrError),

    /// Execution failed.
    #[error(transparent)]
    Execution(#[from] HalError),

    /// Counts could not be interpreted.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// An experiment parameter is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading player input or writing game output failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
