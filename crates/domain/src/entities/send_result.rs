//! Result of a successful provider send

use serde::{Deserialize, Serialize};

/// Outcome of a message accepted by the provider
///
/// Serialized with the field names the send endpoint has always returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    /// Always `true` for results that reach the caller
    pub success: bool,
    /// Provider message identifier (Twilio `SM...` SID)
    #[serde(rename = "messageSid")]
    pub provider_message_id: String,
    /// Provider-defined delivery state, e.g. `queued` or `scheduled`
    pub status: String,
    /// Recipient address as echoed by the provider
    pub to: String,
    /// Sender address as echoed by the provider
    pub from: String,
}

impl SendResult {
    /// Create a successful result
    pub fn accepted(
        provider_message_id: impl Into<String>,
        status: impl Into<String>,
        to: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            provider_message_id: provider_message_id.into(),
            status: status.into(),
            to: to.into(),
            from: from.into(),
        }
    }
}
