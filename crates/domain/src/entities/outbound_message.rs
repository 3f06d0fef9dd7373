//! Outbound message construction
//!
//! `SendMessageOptions` is what callers ask for; `OutboundMessageRequest` is
//! the provider-agnostic record handed to the message gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{errors::DomainError, phone::add_provider_prefix};

/// Validation message for a missing recipient
pub const MISSING_RECIPIENT: &str = "Recipient number is required";

/// Validation message for a request without any content
pub const MISSING_CONTENT: &str = "Message content, media URL, or voice memo URL is required";

/// Caller-facing options for sending a WhatsApp message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageOptions {
    /// Recipient phone number, with or without the `whatsapp:` scheme
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    /// Text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Image, video, or document URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Audio URL sent as a voice memo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_memo_url: Option<String>,
    /// Delivery time for scheduled messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl SendMessageOptions {
    /// Options for a plain text message
    pub fn text(to: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Options for a voice memo
    pub fn voice_memo(to: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            voice_memo_url: Some(audio_url.into()),
            ..Self::default()
        }
    }

    /// Set the scheduled delivery time
    #[must_use]
    pub fn scheduled_at(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.scheduled_time = time;
        self
    }

    /// Check the preconditions for building a request
    ///
    /// Empty strings count as absent. The recipient is checked first.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.to.is_empty() {
            return Err(DomainError::validation(MISSING_RECIPIENT));
        }

        let has_content = [&self.message, &self.media_url, &self.voice_memo_url]
            .into_iter()
            .any(|field| non_empty(field.as_deref()).is_some());

        if !has_content {
            return Err(DomainError::validation(MISSING_CONTENT));
        }

        Ok(())
    }
}

/// Provider-agnostic send request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessageRequest {
    /// Recipient address (`whatsapp:+<E.164>`)
    pub destination: String,
    /// Sender address (`whatsapp:+<E.164>`)
    pub source_address: String,
    /// Text body
    pub text: Option<String>,
    /// Attachment URLs (zero or one in practice)
    pub media_urls: Option<Vec<String>>,
    /// Delivery time for scheduled messages
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl OutboundMessageRequest {
    /// Build a request from validated options
    ///
    /// `media_url` and `voice_memo_url` share one attachment slot. When both
    /// are set the voice memo replaces the media URL.
    pub fn build(options: &SendMessageOptions, source_address: &str) -> Self {
        let mut request = Self {
            destination: add_provider_prefix(&options.to),
            source_address: add_provider_prefix(source_address),
            text: None,
            media_urls: None,
            scheduled_at: None,
        };

        if let Some(message) = non_empty(options.message.as_deref()) {
            request.text = Some(message.to_string());
        }

        if let Some(url) = non_empty(options.media_url.as_deref()) {
            request.media_urls = Some(vec![url.to_string()]);
        }

        if let Some(url) = non_empty(options.voice_memo_url.as_deref()) {
            request.media_urls = Some(vec![url.to_string()]);
        }

        if let Some(time) = options.scheduled_time {
            request.scheduled_at = Some(time);
        }

        request
    }

    /// Whether the request carries an attachment
    pub fn has_media(&self) -> bool {
        self.media_urls.as_ref().is_some_and(|urls| !urls.is_empty())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Deserialize a nullable string, mapping `null` to `""`
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SENDER: &str = "+14155238886";

    #[test]
    fn text_message_request() {
        let options = SendMessageOptions::text("+15551234567", "hi");
        let request = OutboundMessageRequest::build(&options, SENDER);

        assert_eq!(request.destination, "whatsapp:+15551234567");
        assert_eq!(request.source_address, "whatsapp:+14155238886");
        assert_eq!(request.text.as_deref(), Some("hi"));
        assert!(request.media_urls.is_none());
        assert!(request.scheduled_at.is_none());
        assert!(!request.has_media());
    }

    #[test]
    fn media_url_becomes_single_attachment() {
        let options = SendMessageOptions {
            to: "+15551234567".to_string(),
            media_url: Some("https://x/b.jpg".to_string()),
            ..Default::default()
        };
        let request = OutboundMessageRequest::build(&options, SENDER);

        assert_eq!(request.media_urls, Some(vec!["https://x/b.jpg".to_string()]));
        assert!(request.text.is_none());
    }

    #[test]
    fn voice_memo_replaces_media_url() {
        let options = SendMessageOptions {
            to: "+15551234567".to_string(),
            media_url: Some("https://x/b.jpg".to_string()),
            voice_memo_url: Some("https://x/a.mp3".to_string()),
            ..Default::default()
        };
        let request = OutboundMessageRequest::build(&options, SENDER);

        assert_eq!(request.media_urls, Some(vec!["https://x/a.mp3".to_string()]));
    }

    #[test]
    fn empty_strings_are_not_content() {
        let options = SendMessageOptions {
            to: "+15551234567".to_string(),
            message: Some(String::new()),
            media_url: Some("https://x/b.jpg".to_string()),
            voice_memo_url: Some(String::new()),
            ..Default::default()
        };
        let request = OutboundMessageRequest::build(&options, SENDER);

        assert!(request.text.is_none());
        assert_eq!(request.media_urls, Some(vec!["https://x/b.jpg".to_string()]));
    }

    #[test]
    fn scheduled_time_is_carried() {
        let when = Utc.with_ymd_and_hms(2026, 1, 2, 8, 30, 0).unwrap();
        let options = SendMessageOptions::text("+15551234567", "later").scheduled_at(Some(when));
        let request = OutboundMessageRequest::build(&options, SENDER);

        assert_eq!(request.scheduled_at, Some(when));
    }

    #[test]
    fn destination_keeps_existing_scheme() {
        let options = SendMessageOptions::text("whatsapp:+15551234567", "hi");
        let request = OutboundMessageRequest::build(&options, "whatsapp:+14155238886");

        assert_eq!(request.destination, "whatsapp:+15551234567");
        assert_eq!(request.source_address, "whatsapp:+14155238886");
    }

    #[test]
    fn validate_requires_recipient() {
        let options = SendMessageOptions::default();
        assert_eq!(
            options.validate(),
            Err(DomainError::validation(MISSING_RECIPIENT))
        );
    }

    #[test]
    fn validate_checks_recipient_before_content() {
        let options = SendMessageOptions {
            message: Some("hi".to_string()),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DomainError::validation(MISSING_RECIPIENT))
        );
    }

    #[test]
    fn validate_requires_content() {
        let options = SendMessageOptions {
            to: "+15551234567".to_string(),
            message: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(DomainError::validation(MISSING_CONTENT))
        );
    }

    #[test]
    fn validate_accepts_any_single_content_field() {
        assert!(SendMessageOptions::text("+1555", "hi").validate().is_ok());
        assert!(SendMessageOptions::voice_memo("+1555", "https://x/a.mp3").validate().is_ok());

        let media_only = SendMessageOptions {
            to: "+1555".to_string(),
            media_url: Some("https://x/b.jpg".to_string()),
            ..Default::default()
        };
        assert!(media_only.validate().is_ok());
    }

    #[test]
    fn options_deserialize_from_camel_case() {
        let json = r#"{
            "to": "+15551234567",
            "mediaUrl": "https://x/b.jpg",
            "voiceMemoUrl": "https://x/a.mp3",
            "scheduledTime": "2026-01-02T08:30:00Z"
        }"#;
        let options: SendMessageOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.to, "+15551234567");
        assert!(options.message.is_none());
        assert_eq!(options.media_url.as_deref(), Some("https://x/b.jpg"));
        assert_eq!(options.voice_memo_url.as_deref(), Some("https://x/a.mp3"));
        assert!(options.scheduled_time.is_some());
    }

    #[test]
    fn missing_to_deserializes_as_empty() {
        let options: SendMessageOptions = serde_json::from_str("{}").unwrap();
        assert!(options.to.is_empty());
    }

    #[test]
    fn null_to_fails_validation_as_missing() {
        let options: SendMessageOptions =
            serde_json::from_str(r#"{"to": null, "message": "hi"}"#).unwrap();

        assert!(options.to.is_empty());
        assert_eq!(
            options.validate(),
            Err(DomainError::validation(MISSING_RECIPIENT))
        );
    }
}
