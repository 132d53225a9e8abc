//! Error types for the sentiment classification core

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by partitioning, classification and evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter is outside its allowed range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was called on a model that cannot support it
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Predictions and ground truth differ in length
    #[error("Length mismatch: expected {expected} predictions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A metric's denominator is zero
    #[error("Undefined metric: {metric} has a zero denominator")]
    UndefinedMetric { metric: &'static str },
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Error::InvalidState(msg.into())
    }
}
