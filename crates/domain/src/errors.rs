//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or empty
    #[error("{0}")]
    ValidationError(String),

    /// Unknown coaching message kind
    #[error("Unknown coaching message kind: {0}")]
    UnknownCoachingKind(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
