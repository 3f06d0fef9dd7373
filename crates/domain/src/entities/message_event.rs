//! Message lifecycle events used for tracking

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageEventKind {
    Sent,
    Delivered,
    Read,
    Failed,
}

impl MessageEventKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for MessageEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked message event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message_sid: String,
    pub event: MessageEventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl MessageEvent {
    /// Record an event happening now
    pub fn now(
        message_sid: impl Into<String>,
        event: MessageEventKind,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message_sid: message_sid.into(),
            event,
            timestamp: Utc::now(),
            metadata,
        }
    }
}
