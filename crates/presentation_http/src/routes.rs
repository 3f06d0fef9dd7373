//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
///
/// Tracing and CORS are added by the binary; request ids and the body
/// limit are part of the router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_bytes;

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/whatsapp/send", post(handlers::whatsapp::send_message))
        .route("/api/whatsapp/webhook", post(handlers::whatsapp::handle_webhook))
        .route(
            "/api/whatsapp/coaching",
            post(handlers::whatsapp::send_coaching_message),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestIdLayer::new())
        .with_state(state)
}
