//! Twilio webhook handling
//!
//! Parses form-encoded inbound message callbacks, validates the
//! `X-Twilio-Signature` header, and provides the TwiML acknowledgement.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use domain::InboundMessage;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::warn;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Empty TwiML `<Response/>` document; tells Twilio not to reply
pub const EMPTY_TWIML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response/>"#;

/// Decode an `application/x-www-form-urlencoded` body into ordered pairs
pub fn parse_form(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body).into_owned().collect()
}

fn field<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Build an `InboundMessage` from webhook form fields
///
/// Never fails: missing ids and addresses become empty strings, a missing
/// or unparsable `NumMedia` becomes zero.
pub fn parse_inbound(params: &[(String, String)]) -> InboundMessage {
    InboundMessage {
        provider_message_id: field(params, "MessageSid").unwrap_or_default().to_string(),
        from: field(params, "From").unwrap_or_default().to_string(),
        to: field(params, "To").unwrap_or_default().to_string(),
        text: field(params, "Body").map(str::to_string),
        media_url: field(params, "MediaUrl0").map(str::to_string),
        media_count: field(params, "NumMedia")
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(0),
        received_at: Utc::now(),
    }
}

/// Compute the Twilio request signature
///
/// base64(HMAC-SHA1(auth_token, url + key1 + value1 + key2 + value2 ...))
/// with parameters sorted by key.
pub fn compute_signature(auth_token: &str, url: &str, params: &[(String, String)]) -> String {
    signing_mac(auth_token, url, params)
        .map(|mac| STANDARD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Verify an `X-Twilio-Signature` value
pub fn verify_signature(
    auth_token: &str,
    url: &str,
    params: &[(String, String)],
    signature: &str,
) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        warn!("Failed to decode signature base64");
        return false;
    };

    let Some(mac) = signing_mac(auth_token, url, params) else {
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}

fn signing_mac(auth_token: &str, url: &str, params: &[(String, String)]) -> Option<HmacSha1> {
    let Ok(mut mac) = HmacSha1::new_from_slice(auth_token.as_bytes()) else {
        warn!("Failed to create HMAC");
        return None;
    };

    // Stable sort by key; repeated keys keep their submitted order
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    mac.update(url.as_bytes());
    for (key, value) in sorted {
        mac.update(key.as_bytes());
        mac.update(value.as_bytes());
    }
    Some(mac)
}
