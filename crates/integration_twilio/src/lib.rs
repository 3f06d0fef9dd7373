//! Twilio WhatsApp integration
//!
//! Sends messages through the Twilio Messages API and handles inbound
//! message webhooks.

pub mod client;
pub mod webhook;

pub use client::{
    CreateMessageParams, MessageResource, TwilioClient, TwilioClientConfig, TwilioError,
};
pub use webhook::{
    EMPTY_TWIML, SIGNATURE_HEADER, compute_signature, parse_form, parse_inbound, verify_signature,
};
