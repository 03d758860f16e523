//! Emitter errors.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// NaN or an infinity has no textual form.
    #[error("Gate '{gate}' has a non-finite angle {value}")]
    NonFiniteAngle { gate: &'static str, value: f64 },

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type EmitResult<T> = Result<T, EmitError>;
