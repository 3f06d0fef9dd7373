//! API error handling
//!
//! Maps application errors to JSON responses. Internal details are logged,
//! never returned.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::WhatsAppError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Generic body for unexpected failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid input; the message is returned as-is
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Webhook signature missing or wrong
    #[error("Unauthorized")]
    Unauthorized,

    /// Provider failure already mapped to a status and kind
    #[error("Provider error: {0}")]
    Provider(WhatsAppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code, present for provider failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::message(msg)),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::message("Unauthorized"),
            ),
            Self::Provider(err) => (
                StatusCode::from_u16(err.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorResponse {
                    error: err.message,
                    code: Some(err.kind.as_str().to_string()),
                },
            ),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message(INTERNAL_ERROR_MESSAGE),
                )
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Validation(msg) => Self::BadRequest(msg),
            ApplicationError::Provider(e) => Self::Provider(e),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use domain::WhatsAppErrorKind;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_returns_message_verbatim() {
        let response =
            ApiError::BadRequest("Recipient number is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Recipient number is required"})
        );
    }

    #[tokio::test]
    async fn unauthorized_body() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, serde_json::json!({"error": "Unauthorized"}));
    }

    #[tokio::test]
    async fn provider_error_uses_mapped_status_and_kind() {
        let err =
            WhatsAppError::new("Message quota exceeded", WhatsAppErrorKind::QuotaExceeded, 429);
        let response = ApiError::Provider(err).into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Message quota exceeded", "code": "QUOTA_EXCEEDED"})
        );
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = ApiError::Internal("database password wrong".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }

    #[test]
    fn from_application_error() {
        assert!(matches!(
            ApiError::from(ApplicationError::Validation("x".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Internal("x".to_string())),
            ApiError::Internal(_)
        ));

        let err = WhatsAppError::new("Failed to send message", WhatsAppErrorKind::SendError, 500);
        assert!(matches!(
            ApiError::from(ApplicationError::Provider(err)),
            ApiError::Provider(_)
        ));
    }

    #[test]
    fn error_display() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).to_string(),
            "Bad request: bad"
        );
    }
}
