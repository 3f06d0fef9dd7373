//! Provider error mapping
//!
//! Translates Twilio numeric error codes into the small internal taxonomy.

use domain::{WhatsAppError, WhatsAppErrorKind};

use crate::ports::GatewayError;

/// Twilio: "The 'To' number is not a valid phone number"
pub const CODE_INVALID_PHONE: i64 = 21211;
/// Twilio: authentication failure
pub const CODE_AUTH_FAILED: i64 = 20003;
/// Twilio: recipient not reachable under current quota / sandbox rules
pub const CODE_QUOTA_EXCEEDED: i64 = 21608;

/// Map a raw gateway failure to a `WhatsAppError`
pub fn map_error(err: &GatewayError) -> WhatsAppError {
    match err.code {
        Some(CODE_INVALID_PHONE) => WhatsAppError::new(
            "Invalid phone number format",
            WhatsAppErrorKind::InvalidPhone,
            400,
        ),
        Some(CODE_AUTH_FAILED) => WhatsAppError::new(
            "Twilio authentication failed",
            WhatsAppErrorKind::AuthError,
            401,
        ),
        Some(CODE_QUOTA_EXCEEDED) => WhatsAppError::new(
            "Message quota exceeded",
            WhatsAppErrorKind::QuotaExceeded,
            429,
        ),
        _ => WhatsAppError::new("Failed to send message", WhatsAppErrorKind::SendError, 500),
    }
}
