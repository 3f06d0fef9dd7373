//! Tracing subscriber setup
//!
//! Console logging only, as human-readable text or one JSON object per line.

mod subscriber;

pub use subscriber::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};
