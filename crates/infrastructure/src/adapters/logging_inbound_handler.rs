//! Default inbound message hook

use application::{error::ApplicationError, ports::InboundMessagePort};
use async_trait::async_trait;
use domain::InboundMessage;
use tracing::info;

/// Inbound hook that only logs the message
///
/// Stand-in until conversations are processed; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInboundHandler;

impl LoggingInboundHandler {
    /// Create a new handler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InboundMessagePort for LoggingInboundHandler {
    async fn on_message(&self, message: &InboundMessage) -> Result<(), ApplicationError> {
        info!(
            message_sid = %message.provider_message_id,
            from = %message.from,
            body = message.text.as_deref().unwrap_or_default(),
            media_count = message.media_count,
            "Received WhatsApp message"
        );
        Ok(())
    }
}
