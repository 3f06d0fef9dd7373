//! Application state shared across handlers

use std::sync::Arc;

use application::MessagingService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Send and receive use cases
    pub messaging_service: Arc<MessagingService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
