//! Message gateway port - Interface to the WhatsApp messaging provider

use async_trait::async_trait;
use domain::{OutboundMessageRequest, SendResult};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Raw failure reported by the messaging provider
///
/// `code` is the provider's numeric error code when the failure came back
/// as an API error; transport failures carry none.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub code: Option<i64>,
    pub message: String,
}

impl GatewayError {
    /// A provider API error with a numeric code
    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// A failure without a provider code (network, decoding, ...)
    pub fn without_code(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// Port for sending messages through the provider
///
/// Implementations pass the request on verbatim and do not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageGatewayPort: Send + Sync {
    /// Send a message and return the provider's acknowledgement
    async fn send(&self, request: &OutboundMessageRequest) -> Result<SendResult, GatewayError>;
}
