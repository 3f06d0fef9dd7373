//! Twilio client for sending WhatsApp messages
//!
//! Uses the Twilio Messages REST API (`2010-04-01`).

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// Default Twilio REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Twilio API errors
#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {code:?} - {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
}

impl TwilioError {
    /// Twilio numeric error code, when the API returned one
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            Self::Request(_) => None,
        }
    }
}

/// Twilio client configuration
#[derive(Clone)]
pub struct TwilioClientConfig {
    /// Account SID (`AC...`)
    pub account_sid: String,
    /// Auth token, used for basic auth and webhook signatures
    pub auth_token: String,
    /// Optional messaging service SID (`MG...`), required by Twilio for scheduling
    pub messaging_service_sid: Option<String>,
    /// REST API base URL
    pub base_url: String,
}

impl std::fmt::Debug for TwilioClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClientConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("messaging_service_sid", &self.messaging_service_sid)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for TwilioClientConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            messaging_service_sid: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Parameters for creating a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateMessageParams {
    pub to: String,
    pub from: String,
    pub body: Option<String>,
    pub media_urls: Vec<String>,
    pub send_at: Option<DateTime<Utc>>,
}

impl CreateMessageParams {
    /// Encode as Twilio form fields
    ///
    /// `MediaUrl` repeats once per attachment. A scheduled send adds
    /// `SendAt` and `ScheduleType=fixed`.
    pub fn form_fields(&self, messaging_service_sid: Option<&str>) -> Vec<(&'static str, String)> {
        let mut fields = vec![("To", self.to.clone()), ("From", self.from.clone())];

        if let Some(sid) = messaging_service_sid {
            fields.push(("MessagingServiceSid", sid.to_string()));
        }
        if let Some(body) = &self.body {
            fields.push(("Body", body.clone()));
        }
        for url in &self.media_urls {
            fields.push(("MediaUrl", url.clone()));
        }
        if let Some(send_at) = self.send_at {
            fields.push(("SendAt", send_at.to_rfc3339_opts(SecondsFormat::Secs, true)));
            fields.push(("ScheduleType", "fixed".to_string()));
        }

        fields
    }
}

/// Message resource returned by Twilio
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResource {
    pub sid: String,
    pub status: String,
    pub to: String,
    pub from: Option<String>,
}

/// Error body returned by Twilio for failed requests
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the Twilio Messages API
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    config: TwilioClientConfig,
}

impl TwilioClient {
    /// Create a new Twilio client
    ///
    /// Credentials are not checked here; Twilio rejects bad ones per request.
    pub fn new(config: TwilioClientConfig) -> Result<Self, TwilioError> {
        let client = Client::builder()
            .user_agent(concat!("futureself/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Messages endpoint for the configured account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Create (send or schedule) a message
    #[instrument(skip(self, params), fields(to = %params.to))]
    pub async fn create_message(
        &self,
        params: &CreateMessageParams,
    ) -> Result<MessageResource, TwilioError> {
        let fields = params.form_fields(self.config.messaging_service_sid.as_deref());

        debug!(
            field_count = fields.len(),
            media_count = params.media_urls.len(),
            "Creating Twilio message"
        );

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await?;
        let (code, message) = match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(body) => (body.code, body.message.unwrap_or(text)),
            Err(_) => (None, text),
        };

        Err(TwilioError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}
