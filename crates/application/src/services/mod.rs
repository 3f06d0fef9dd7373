//! Application services - Use case implementations

mod messaging_service;

pub use messaging_service::MessagingService;
