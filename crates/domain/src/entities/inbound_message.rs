//! Inbound WhatsApp message received via webhook

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized incoming message
///
/// Built at webhook receipt time. `received_at` is the local clock reading
/// at parse time; the provider does not send a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Provider message identifier
    pub provider_message_id: String,
    /// Sender address (`whatsapp:+...`)
    pub from: String,
    /// Recipient address, i.e. our sender number
    pub to: String,
    /// Text body, if any
    pub text: Option<String>,
    /// First media attachment URL, if any
    pub media_url: Option<String>,
    /// Number of attached media items
    pub media_count: u32,
    /// When the webhook was parsed
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Whether the message carries at least one attachment
    pub const fn has_media(&self) -> bool {
        self.media_count > 0
    }
}
