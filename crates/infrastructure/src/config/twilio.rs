//! Twilio account and webhook configuration.

use integration_twilio::{TwilioClientConfig, client::DEFAULT_BASE_URL};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Twilio integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    /// Account SID (`AC...`)
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Auth token for API calls and webhook signatures (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub auth_token: Option<SecretString>,

    /// Our WhatsApp sender number, with or without the `whatsapp:` scheme
    #[serde(default)]
    pub whatsapp_number: Option<String>,

    /// Messaging service SID (`MG...`), needed for scheduled sends
    #[serde(default)]
    pub messaging_service_sid: Option<String>,

    /// REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Public webhook URL used for signature checks
    ///
    /// When unset the URL is rebuilt from the request headers.
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Whether webhook signature verification is required (default: true)
    #[serde(default = "default_true")]
    pub signature_required: bool,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field(
                "auth_token",
                &if self.auth_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("whatsapp_number", &self.whatsapp_number)
            .field("messaging_service_sid", &self.messaging_service_sid)
            .field("api_base_url", &self.api_base_url)
            .field("webhook_url", &self.webhook_url)
            .field("signature_required", &self.signature_required)
            .finish()
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            whatsapp_number: None,
            messaging_service_sid: None,
            api_base_url: default_api_base_url(),
            webhook_url: None,
            signature_required: true,
        }
    }
}

impl TwilioConfig {
    /// Get the auth token as a string reference
    #[must_use]
    pub fn auth_token_str(&self) -> Option<&str> {
        self.auth_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Sender number, empty when unconfigured
    #[must_use]
    pub fn sender_number(&self) -> &str {
        self.whatsapp_number.as_deref().unwrap_or_default()
    }

    /// Names of required settings that are missing or empty
    #[must_use]
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_sid.as_deref().is_none_or(str::is_empty) {
            missing.push("account_sid");
        }
        if self.auth_token_str().is_none_or(str::is_empty) {
            missing.push("auth_token");
        }
        if self.whatsapp_number.as_deref().is_none_or(str::is_empty) {
            missing.push("whatsapp_number");
        }
        missing
    }

    /// Client settings for the REST API
    ///
    /// Missing credentials become empty strings; Twilio rejects the
    /// request with an authentication error.
    #[must_use]
    pub fn client_config(&self) -> TwilioClientConfig {
        TwilioClientConfig {
            account_sid: self.account_sid.clone().unwrap_or_default(),
            auth_token: self.auth_token_str().unwrap_or_default().to_string(),
            messaging_service_sid: self.messaging_service_sid.clone(),
            base_url: self.api_base_url.clone(),
        }
    }
}
