//! Application-level errors

use domain::{DomainError, WhatsAppError};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A required field is missing
    #[error("{0}")]
    Validation(String),

    /// The provider rejected or failed the request
    #[error(transparent)]
    Provider(#[from] WhatsAppError),

    /// Unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
