//! Ports - Interfaces to external systems

mod inbound_message_port;
mod message_gateway_port;

pub use inbound_message_port::InboundMessagePort;
pub use message_gateway_port::{GatewayError, MessageGatewayPort};

#[cfg(test)]
pub use inbound_message_port::MockInboundMessagePort;
#[cfg(test)]
pub use message_gateway_port::MockMessageGatewayPort;
