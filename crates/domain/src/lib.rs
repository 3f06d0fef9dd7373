//! Domain layer for FutureSelf
//!
//! Contains the message records, WhatsApp address formatting, the outbound
//! request builder, coaching templates, and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod phone;

pub use entities::*;
pub use errors::DomainError;
pub use phone::{PROVIDER_PREFIX, add_provider_prefix, format_number, strip_provider_prefix};
