//! Chat
//!
//! Conversation state for the booking assistant widget and the slot-card
//! formatting it renders.

mod format;
#[cfg(feature = "native")]
mod service;
mod session;

pub use format::{format_time, SlotCard};
#[cfg(feature = "native")]
pub use service::ChatService;
pub use session::{ChatMessage, ChatSession, Sender, FAILURE_REPLY, GREETING};
