//! Domain entities

mod coaching;
mod inbound_message;
mod message_event;
mod outbound_message;
mod send_result;
mod whatsapp_error;

pub use coaching::{CoachingContext, CoachingMessageKind};
pub use inbound_message::InboundMessage;
pub use message_event::{MessageEvent, MessageEventKind};
pub use outbound_message::{OutboundMessageRequest, SendMessageOptions, null_as_empty};
pub use send_result::SendResult;
pub use whatsapp_error::{WhatsAppError, WhatsAppErrorKind};
