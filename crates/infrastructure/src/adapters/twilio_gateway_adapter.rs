//! Twilio gateway adapter
//!
//! Implements `MessageGatewayPort` using the Twilio integration crate.

use application::ports::{GatewayError, MessageGatewayPort};
use async_trait::async_trait;
use domain::{OutboundMessageRequest, SendResult};
use integration_twilio::{
    CreateMessageParams, MessageResource, TwilioClient, TwilioClientConfig, TwilioError,
};
use tracing::{debug, instrument, warn};

/// Adapter that implements `MessageGatewayPort` using `TwilioClient`
#[derive(Debug, Clone)]
pub struct TwilioGatewayAdapter {
    client: TwilioClient,
}

impl TwilioGatewayAdapter {
    /// Create a new Twilio gateway adapter
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TwilioClientConfig) -> Result<Self, TwilioError> {
        Ok(Self {
            client: TwilioClient::new(config)?,
        })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: TwilioClient) -> Self {
        Self { client }
    }
}

fn create_params(request: &OutboundMessageRequest) -> CreateMessageParams {
    CreateMessageParams {
        to: request.destination.clone(),
        from: request.source_address.clone(),
        body: request.text.clone(),
        media_urls: request.media_urls.clone().unwrap_or_default(),
        send_at: request.scheduled_at,
    }
}

fn send_result(resource: MessageResource, request: &OutboundMessageRequest) -> SendResult {
    let from = resource
        .from
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| request.source_address.clone());
    SendResult::accepted(resource.sid, resource.status, resource.to, from)
}

fn gateway_error(err: TwilioError) -> GatewayError {
    match err {
        TwilioError::Api {
            code: Some(code),
            message,
            ..
        } => GatewayError::with_code(code, message),
        TwilioError::Api {
            code: None,
            message,
            ..
        } => GatewayError::without_code(message),
        TwilioError::Request(e) => GatewayError::without_code(e.to_string()),
    }
}

#[async_trait]
impl MessageGatewayPort for TwilioGatewayAdapter {
    #[instrument(skip(self, request), fields(to = %request.destination))]
    async fn send(&self, request: &OutboundMessageRequest) -> Result<SendResult, GatewayError> {
        let resource = self
            .client
            .create_message(&create_params(request))
            .await
            .map_err(|e| {
                warn!(error = %e, "Twilio rejected message");
                gateway_error(e)
            })?;

        debug!(sid = %resource.sid, status = %resource.status, "Twilio accepted message");
        Ok(send_result(resource, request))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn request() -> OutboundMessageRequest {
        OutboundMessageRequest {
            destination: "whatsapp:+15551234567".to_string(),
            source_address: "whatsapp:+14155238886".to_string(),
            text: Some("hi".to_string()),
            media_urls: None,
            scheduled_at: None,
        }
    }

    fn resource(from: Option<&str>) -> MessageResource {
        MessageResource {
            sid: "SM1".to_string(),
            status: "queued".to_string(),
            to: "whatsapp:+15551234567".to_string(),
            from: from.map(str::to_string),
        }
    }

    #[test]
    fn params_copy_request_fields() {
        let when = Utc.with_ymd_and_hms(2026, 11, 1, 9, 0, 0).unwrap();
        let request = OutboundMessageRequest {
            media_urls: Some(vec!["https://x/a.mp3".to_string()]),
            scheduled_at: Some(when),
            ..request()
        };

        let params = create_params(&request);
        assert_eq!(params.to, "whatsapp:+15551234567");
        assert_eq!(params.from, "whatsapp:+14155238886");
        assert_eq!(params.body.as_deref(), Some("hi"));
        assert_eq!(params.media_urls, vec!["https://x/a.mp3".to_string()]);
        assert_eq!(params.send_at, Some(when));
    }

    #[test]
    fn params_without_media_have_empty_list() {
        assert!(create_params(&request()).media_urls.is_empty());
    }

    #[test]
    fn result_echoes_provider_addresses() {
        let result = send_result(resource(Some("whatsapp:+14155238886")), &request());
        assert!(result.success);
        assert_eq!(result.provider_message_id, "SM1");
        assert_eq!(result.status, "queued");
        assert_eq!(result.from, "whatsapp:+14155238886");
    }

    #[test]
    fn missing_from_falls_back_to_sender() {
        let result = send_result(resource(None), &request());
        assert_eq!(result.from, "whatsapp:+14155238886");
    }

    #[test]
    fn api_error_keeps_code() {
        let err = gateway_error(TwilioError::Api {
            status: 400,
            code: Some(21211),
            message: "Invalid 'To' Phone Number".to_string(),
        });
        assert_eq!(err, GatewayError::with_code(21211, "Invalid 'To' Phone Number"));
    }

    #[test]
    fn api_error_without_code() {
        let err = gateway_error(TwilioError::Api {
            status: 503,
            code: None,
            message: "Service Unavailable".to_string(),
        });
        assert!(err.code.is_none());
        assert_eq!(err.message, "Service Unavailable");
    }
}
