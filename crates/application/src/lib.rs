//! Application layer - Use cases and orchestration
//!
//! Defines the ports to the messaging provider and the inbound hook, the
//! provider error mapper, and the messaging use cases.

pub mod error;
pub mod error_mapper;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use error_mapper::map_error;
pub use ports::*;
pub use services::*;
