//! FutureSelf WhatsApp gateway server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::MessagingService;
use axum::http::{HeaderValue, Method};
use infrastructure::{AppConfig, LoggingInboundHandler, TwilioGatewayAdapter, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config errors are reported after tracing is up
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(config.server.json_logs())?;

    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("FutureSelf gateway v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        environment = %config.environment(),
        host = %config.server.host,
        port = %config.server.port,
        twilio = ?config.twilio,
        "Configuration loaded"
    );

    let missing = config.twilio.missing_settings();
    if !missing.is_empty() {
        warn!(missing = ?missing, "Twilio credentials incomplete; sends will fail");
    }
    if !config.twilio.signature_required {
        warn!("Twilio webhook signature verification is disabled");
    }

    let gateway = TwilioGatewayAdapter::new(config.twilio.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize Twilio client: {e}"))?;

    let messaging_service = MessagingService::new(
        Arc::new(gateway),
        Arc::new(LoggingInboundHandler::new()),
        config.twilio.sender_number(),
    );

    let cors_layer = cors_layer(&config);
    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let state = AppState {
        messaging_service: Arc::new(messaging_service),
        config: Arc::new(config),
    };

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Permissive in development, `server.allowed_origins` only in production
fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.is_production() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
