//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides
//! configuration loading and tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, Environment, ServerConfig, TwilioConfig};
pub use telemetry::{TelemetryError, init_tracing};
