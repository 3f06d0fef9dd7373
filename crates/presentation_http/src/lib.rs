//! FutureSelf HTTP presentation layer
//!
//! Exposes the WhatsApp send, coaching, and webhook endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;
