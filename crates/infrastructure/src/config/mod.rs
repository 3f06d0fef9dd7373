//! Application configuration
//!
//! Layered with the `config` crate, later sources winning:
//! - built-in defaults
//! - optional `config.toml` in the working directory
//! - `FUTURESELF__SECTION__KEY` environment variables
//! - the conventional `TWILIO_*` variables
//!
//! Missing Twilio credentials are not an error at load time; see
//! [`TwilioConfig::missing_settings`].

mod server;
mod twilio;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use server::ServerConfig;
pub use twilio::TwilioConfig;

/// Prefix for nested environment overrides
pub const ENV_PREFIX: &str = "FUTURESELF";

/// Conventional Twilio variables and the keys they override
const TWILIO_ENV_OVERRIDES: [(&str, &str); 4] = [
    ("TWILIO_ACCOUNT_SID", "twilio.account_sid"),
    ("TWILIO_AUTH_TOKEN", "twilio.auth_token"),
    ("TWILIO_WHATSAPP_NUMBER", "twilio.whatsapp_number"),
    ("TWILIO_WEBHOOK_URL", "twilio.webhook_url"),
];

pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - permissive CORS
    #[default]
    Development,
    /// Production environment - CORS restricted to `server.allowed_origins`
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (defaults to development)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Twilio account and webhook configuration
    #[serde(default)]
    pub twilio: TwilioConfig,
}

impl AppConfig {
    /// Load configuration from file and process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None, |key| std::env::var(key).ok())
    }

    /// Load with an explicit environment map and `TWILIO_*` lookup
    ///
    /// `env` replaces the process environment for the `FUTURESELF__` source
    /// when given.
    fn load_from(
        env: Option<config::Map<String, String>>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .source(env),
            );

        for (variable, key) in TWILIO_ENV_OVERRIDES {
            builder = builder.set_override_option(key, lookup(variable).filter(|v| !v.is_empty()))?;
        }

        builder.build()?.try_deserialize()
    }

    /// Effective environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether running in production
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment() == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_from(env(&[]), |_| None).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.environment(), Environment::Development);
        assert!(config.twilio.account_sid.is_none());
        assert!(config.twilio.signature_required);
    }

    #[test]
    fn nested_environment_overrides() {
        let config = AppConfig::load_from(
            env(&[
                ("FUTURESELF__SERVER__PORT", "8080"),
                ("FUTURESELF__ENVIRONMENT", "production"),
                ("FUTURESELF__TWILIO__SIGNATURE_REQUIRED", "false"),
                (
                    "FUTURESELF__SERVER__ALLOWED_ORIGINS",
                    "https://a.example,https://b.example",
                ),
            ]),
            |_| None,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.is_production());
        assert!(!config.twilio.signature_required);
        assert_eq!(
            config.server.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn twilio_variables_are_applied() {
        let config = AppConfig::load_from(
            env(&[]),
            lookup(&[
                ("TWILIO_ACCOUNT_SID", "AC123"),
                ("TWILIO_AUTH_TOKEN", "token"),
                ("TWILIO_WHATSAPP_NUMBER", "+14155238886"),
                ("TWILIO_WEBHOOK_URL", "https://hooks.example.com/api/whatsapp/webhook"),
            ]),
        )
        .unwrap();

        assert_eq!(config.twilio.account_sid.as_deref(), Some("AC123"));
        assert_eq!(
            config.twilio.auth_token.as_ref().map(ExposeSecret::expose_secret),
            Some("token")
        );
        assert_eq!(config.twilio.whatsapp_number.as_deref(), Some("+14155238886"));
        assert_eq!(
            config.twilio.webhook_url.as_deref(),
            Some("https://hooks.example.com/api/whatsapp/webhook")
        );
        assert!(config.twilio.missing_settings().is_empty());
    }

    #[test]
    fn twilio_variables_beat_nested_keys() {
        let config = AppConfig::load_from(
            env(&[("FUTURESELF__TWILIO__ACCOUNT_SID", "ACnested")]),
            lookup(&[("TWILIO_ACCOUNT_SID", "ACplain")]),
        )
        .unwrap();

        assert_eq!(config.twilio.account_sid.as_deref(), Some("ACplain"));
    }

    #[test]
    fn empty_twilio_variable_is_ignored() {
        let config = AppConfig::load_from(
            env(&[("FUTURESELF__TWILIO__ACCOUNT_SID", "ACnested")]),
            lookup(&[("TWILIO_ACCOUNT_SID", "")]),
        )
        .unwrap();

        assert_eq!(config.twilio.account_sid.as_deref(), Some("ACnested"));
    }

    #[test]
    fn environment_from_str() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Development.to_string(), "development");
    }

    #[test]
    fn debug_never_prints_token() {
        let config = AppConfig::load_from(
            env(&[]),
            lookup(&[("TWILIO_AUTH_TOKEN", "super-secret-token")]),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
