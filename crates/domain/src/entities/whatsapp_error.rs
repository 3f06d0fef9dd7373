//! Internal error taxonomy for provider failures

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a mapped provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WhatsAppErrorKind {
    /// The recipient number was rejected
    InvalidPhone,
    /// Provider credentials were rejected
    AuthError,
    /// Sending quota exhausted
    QuotaExceeded,
    /// Any other failure
    SendError,
}

impl WhatsAppErrorKind {
    /// Stable code string, e.g. `INVALID_PHONE`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPhone => "INVALID_PHONE",
            Self::AuthError => "AUTH_ERROR",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::SendError => "SEND_ERROR",
        }
    }
}

impl fmt::Display for WhatsAppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider failure translated for HTTP callers
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct WhatsAppError {
    /// Human-readable message, safe to return to clients
    pub message: String,
    /// Error kind
    pub kind: WhatsAppErrorKind,
    /// HTTP status code to answer with
    pub http_status: u16,
}

impl WhatsAppError {
    /// Create a new error
    pub fn new(message: impl Into<String>, kind: WhatsAppErrorKind, http_status: u16) -> Self {
        Self {
            message: message.into(),
            kind,
            http_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes() {
        assert_eq!(WhatsAppErrorKind::InvalidPhone.as_str(), "INVALID_PHONE");
        assert_eq!(WhatsAppErrorKind::AuthError.as_str(), "AUTH_ERROR");
        assert_eq!(WhatsAppErrorKind::QuotaExceeded.as_str(), "QUOTA_EXCEEDED");
        assert_eq!(WhatsAppErrorKind::SendError.to_string(), "SEND_ERROR");
    }

    #[test]
    fn kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&WhatsAppErrorKind::QuotaExceeded).unwrap();
        assert_eq!(json, "\"QUOTA_EXCEEDED\"");
    }

    #[test]
    fn error_displays_message() {
        let err =
            WhatsAppError::new("Message quota exceeded", WhatsAppErrorKind::QuotaExceeded, 429);
        assert_eq!(err.to_string(), "Message quota exceeded");
        assert_eq!(err.http_status, 429);
    }
}
