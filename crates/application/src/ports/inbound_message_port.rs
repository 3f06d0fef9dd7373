//! Inbound message port - Hook for processing received messages

use async_trait::async_trait;
use domain::InboundMessage;

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for handing received messages to downstream processing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InboundMessagePort: Send + Sync {
    /// Process one inbound message
    async fn on_message(&self, message: &InboundMessage) -> Result<(), ApplicationError>;
}
