//! Error types for FeeCalculator

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeeError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl FeeError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            FeeError::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }
}
