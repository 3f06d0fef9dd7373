//! Messaging service - WhatsApp send and receive use cases

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{
    CoachingContext, CoachingMessageKind, InboundMessage, MessageEvent, MessageEventKind,
    OutboundMessageRequest, SendMessageOptions, SendResult,
};
use tracing::{debug, error, info, instrument};

use crate::{
    error::ApplicationError,
    error_mapper::map_error,
    ports::{InboundMessagePort, MessageGatewayPort},
};

/// Service for sending and receiving WhatsApp messages
pub struct MessagingService {
    gateway: Arc<dyn MessageGatewayPort>,
    inbound: Arc<dyn InboundMessagePort>,
    sender_address: String,
}

impl fmt::Debug for MessagingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingService")
            .field("sender_address", &self.sender_address)
            .finish_non_exhaustive()
    }
}

impl MessagingService {
    /// Create a new messaging service
    ///
    /// `sender_address` is our WhatsApp number; the `whatsapp:` scheme is
    /// added when missing.
    pub fn new(
        gateway: Arc<dyn MessageGatewayPort>,
        inbound: Arc<dyn InboundMessagePort>,
        sender_address: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            inbound,
            sender_address: sender_address.into(),
        }
    }

    /// Configured sender number
    pub fn sender_address(&self) -> &str {
        &self.sender_address
    }

    /// Validate options and build the provider request
    pub fn prepare(
        &self,
        options: &SendMessageOptions,
    ) -> Result<OutboundMessageRequest, ApplicationError> {
        options.validate()?;
        Ok(OutboundMessageRequest::build(options, &self.sender_address))
    }

    /// Send a message
    ///
    /// Validation failures are returned before the gateway is called.
    /// Gateway failures are mapped to a `WhatsAppError`; nothing is retried.
    #[instrument(skip(self, options), fields(to = %options.to))]
    pub async fn send(&self, options: &SendMessageOptions) -> Result<SendResult, ApplicationError> {
        let request = self.prepare(options)?;

        info!(
            to = %request.destination,
            from = %request.source_address,
            has_text = request.text.is_some(),
            has_media = options.media_url.as_deref().is_some_and(|u| !u.is_empty()),
            has_voice_memo = options.voice_memo_url.as_deref().is_some_and(|u| !u.is_empty()),
            scheduled = request.scheduled_at.is_some(),
            "Sending WhatsApp message"
        );

        match self.gateway.send(&request).await {
            Ok(result) => {
                info!(
                    message_sid = %result.provider_message_id,
                    status = %result.status,
                    to = %result.to,
                    from = %result.from,
                    "Message sent successfully"
                );
                self.track_message_event(&result.provider_message_id, MessageEventKind::Sent, None);
                Ok(result)
            },
            Err(e) => {
                let mapped = map_error(&e);
                error!(
                    error = %e,
                    provider_code = ?e.code,
                    kind = %mapped.kind,
                    "Error sending WhatsApp message"
                );
                Err(mapped.into())
            },
        }
    }

    /// Send one of the coaching templates
    #[instrument(skip(self, context), fields(user_id = %context.user_id, kind = %kind))]
    pub async fn send_coaching_message(
        &self,
        phone_number: &str,
        context: &CoachingContext,
        kind: CoachingMessageKind,
    ) -> Result<SendResult, ApplicationError> {
        let text = kind.render(context);
        self.send(&SendMessageOptions::text(phone_number, text)).await
    }

    /// Send an audio URL as a voice memo
    pub async fn send_voice_memo(
        &self,
        phone_number: &str,
        audio_url: &str,
    ) -> Result<SendResult, ApplicationError> {
        self.send(&SendMessageOptions::voice_memo(phone_number, audio_url))
            .await
    }

    /// Send a text message, optionally scheduled for later delivery
    pub async fn send_scheduled_message(
        &self,
        to: &str,
        message: &str,
        scheduled_time: Option<DateTime<Utc>>,
    ) -> Result<SendResult, ApplicationError> {
        let options = SendMessageOptions::text(to, message).scheduled_at(scheduled_time);
        let result = self.send(&options).await?;

        info!(
            message_sid = %result.provider_message_id,
            scheduled_time = ?scheduled_time,
            to = %result.to,
            "Scheduled message created"
        );

        Ok(result)
    }

    /// Record a message lifecycle event
    ///
    /// Events are logged only; there is no event store.
    pub fn track_message_event(
        &self,
        message_sid: &str,
        event: MessageEventKind,
        metadata: Option<serde_json::Value>,
    ) -> MessageEvent {
        let event = MessageEvent::now(message_sid, event, metadata);
        info!(
            message_sid = %event.message_sid,
            event = %event.event,
            timestamp = %event.timestamp.to_rfc3339(),
            metadata = ?event.metadata,
            "Message event"
        );
        event
    }

    /// Hand an inbound message to the processing hook
    #[instrument(skip(self, message), fields(message_sid = %message.provider_message_id))]
    pub async fn handle_inbound(&self, message: &InboundMessage) -> Result<(), ApplicationError> {
        debug!(
            from = %message.from,
            to = %message.to,
            media_count = message.media_count,
            "Processing inbound WhatsApp message"
        );
        self.inbound.on_message(message).await
    }
}
