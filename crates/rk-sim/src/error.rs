//! Error types for integration runs.

use rk_core::CoreError;
use thiserror::Error;

/// Errors encountered while configuring or running an integration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid {what} ({value}): violates bound {bound}")]
    InvalidConfiguration {
        what: &'static str,
        value: f64,
        bound: f64,
    },

    #[error("Initial state components sum to {sum}, expected 1.0")]
    InvalidInitialState { sum: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(CoreError),

    #[error("Right-hand side failed at step {step}: {message}")]
    RightHandSideFailure { step: usize, message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => SimError::InvalidArg { what },
            other => SimError::ShapeMismatch(other),
        }
    }
}
