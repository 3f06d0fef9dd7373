//! WhatsApp handlers
//!
//! Outbound sends (plain and coaching) take JSON. The inbound webhook takes
//! Twilio's form-encoded callback and answers with empty TwiML.

use axum::{
    Json,
    body::Bytes,
    extract::{OriginalUri, State, rejection::JsonRejection},
    http::{HeaderMap, Uri, header, uri::PathAndQuery},
    response::{IntoResponse, Response},
};
use domain::{CoachingContext, CoachingMessageKind, SendMessageOptions, SendResult};
use integration_twilio::{
    EMPTY_TWIML, SIGNATURE_HEADER, parse_form, parse_inbound, verify_signature,
};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Request body for coaching messages
#[derive(Debug, Deserialize)]
pub struct CoachingRequest {
    /// Recipient phone number
    #[serde(default, deserialize_with = "domain::null_as_empty")]
    pub to: String,
    /// Template name, e.g. `daily_checkin`
    pub kind: String,
    /// Values substituted into the template
    #[serde(default)]
    pub context: CoachingContext,
}

/// Send a WhatsApp message (POST /api/whatsapp/send)
#[instrument(skip(state, payload))]
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageOptions>, JsonRejection>,
) -> Result<Json<SendResult>, ApiError> {
    let Json(options) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let result = state.messaging_service.send(&options).await?;
    Ok(Json(result))
}

/// Send a coaching template (POST /api/whatsapp/coaching)
#[instrument(skip(state, payload))]
pub async fn send_coaching_message(
    State(state): State<AppState>,
    payload: Result<Json<CoachingRequest>, JsonRejection>,
) -> Result<Json<SendResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let kind: CoachingMessageKind = request
        .kind
        .parse()
        .map_err(|e: domain::DomainError| ApiError::BadRequest(e.to_string()))?;

    let result = state
        .messaging_service
        .send_coaching_message(&request.to, &request.context, kind)
        .await?;
    Ok(Json(result))
}

/// Twilio inbound message webhook (POST /api/whatsapp/webhook)
///
/// Unless `twilio.signature_required` is off, the `X-Twilio-Signature`
/// header must match the form parameters and the public URL.
#[instrument(skip_all)]
pub async fn handle_webhook(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = parse_form(&body);
    let twilio = &state.config.twilio;

    if twilio.signature_required {
        let url = public_url(twilio.webhook_url.as_deref(), &headers, &uri);
        if !signature_matches(twilio.auth_token_str(), &url, &params, &headers) {
            warn!(url = %url, "Twilio webhook signature verification failed");
            return ApiError::Unauthorized.into_response();
        }
    } else {
        debug!("Twilio webhook signature check disabled");
    }

    let message = parse_inbound(&params);
    info!(
        message_sid = %message.provider_message_id,
        from = %message.from,
        media_count = message.media_count,
        "Received WhatsApp webhook"
    );

    if let Err(e) = state.messaging_service.handle_inbound(&message).await {
        return ApiError::Internal(e.to_string()).into_response();
    }

    ([(header::CONTENT_TYPE, "text/xml")], EMPTY_TWIML).into_response()
}

fn signature_matches(
    auth_token: Option<&str>,
    url: &str,
    params: &[(String, String)],
    headers: &HeaderMap,
) -> bool {
    let Some(token) = auth_token.filter(|t| !t.is_empty()) else {
        warn!("Twilio auth token not configured; rejecting webhook");
        return false;
    };

    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        debug!("Missing X-Twilio-Signature header");
        return false;
    };

    verify_signature(token, url, params, signature)
}

/// URL Twilio signed: the configured one, or rebuilt from the request
pub fn public_url(configured: Option<&str>, headers: &HeaderMap, uri: &Uri) -> String {
    if let Some(url) = configured.filter(|u| !u.is_empty()) {
        return url.to_string();
    }

    let proto = header_str(headers, FORWARDED_PROTO_HEADER)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("https");
    let host = header_str(headers, header::HOST.as_str())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or_default();
    let path = uri.path_and_query().map_or("/", PathAndQuery::as_str);

    format!("{proto}://{host}{path}")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
