//! Adapters implementing application ports

mod logging_inbound_handler;
mod twilio_gateway_adapter;

pub use logging_inbound_handler::LoggingInboundHandler;
pub use twilio_gateway_adapter::TwilioGatewayAdapter;
