//! Chat Session
//!
//! Append-only conversation with the booking assistant.

use chrono::{DateTime, Utc};

use crate::api::dto::{ChatRequest, ChatResponse, Slot, SlotData};
use crate::api::error::ClientResult;

use super::format::SlotCard;

pub const GREETING: &str =
    "Hi! I'm the ServiceBay assistant. Ask me about open appointment slots, for example \"availability tomorrow\".";
pub const FAILURE_REPLY: &str =
    "Sorry, I couldn't reach the booking assistant right now. Please try again.";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub slots: Option<SlotData>,
}

impl ChatMessage {
    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            slots: None,
        }
    }

    /// Cards for the slots attached to this message
    pub fn slot_cards(&self) -> Vec<SlotCard> {
        self.slots
            .as_ref()
            .map(|data| data.available_slots.iter().map(SlotCard::from).collect())
            .unwrap_or_default()
    }
}

/// Conversation state for one mounted chat widget
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    loading: bool,
    user_id: Option<i64>,
}

impl ChatSession {
    /// Start a conversation seeded with the greeting
    pub fn new(user_id: Option<i64>) -> Self {
        Self {
            messages: vec![ChatMessage::new(Sender::Bot, GREETING)],
            input: String::new(),
            loading: false,
            user_id,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Append the user's message and return the request to send.
    ///
    /// Blank text, or a send while another is in flight, is ignored.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }

        self.messages.push(ChatMessage::new(Sender::User, text));
        self.input.clear();
        self.loading = true;

        Some(ChatRequest {
            message: text.to_string(),
            user_id: self.user_id,
        })
    }

    /// Append the bot's reply, or a generic apology on failure
    pub fn finish_send(&mut self, result: ClientResult<ChatResponse>) {
        let reply = match result {
            Ok(response) => ChatMessage {
                slots: response.data,
                ..ChatMessage::new(Sender::Bot, response.response)
            },
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                ChatMessage::new(Sender::Bot, FAILURE_REPLY)
            }
        };

        self.messages.push(reply);
        self.loading = false;
    }

    /// Put a booking request for `slot` in the input box without sending it
    pub fn select_slot(&mut self, slot: &Slot, date: Option<&str>) {
        let start = slot.start.as_deref().unwrap_or("N/A");
        let end = slot.end.as_deref().unwrap_or("N/A");
        self.input = match date {
            Some(date) => format!(
                "I'd like to book the slot on {} from {} to {}",
                date, start, end
            ),
            None => format!("I'd like to book the slot from {} to {}", start, end),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ClientError;

    fn slot(start: &str, end: &str) -> Slot {
        Slot {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            available_employees: 2,
            required_employees: 1,
        }
    }

    #[test]
    fn test_seeded_with_greeting() {
        let chat = ChatSession::new(None);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
        assert_eq!(chat.messages()[0].text, GREETING);
    }

    #[test]
    fn test_availability_scenario() {
        let mut chat = ChatSession::new(Some(12));

        let request = chat.begin_send("availability tomorrow").unwrap();
        assert_eq!(request.user_id, Some(12));
        assert!(chat.is_loading());

        chat.finish_send(Ok(ChatResponse {
            response: "Here are the slots".to_string(),
            data: Some(SlotData {
                available_slots: vec![slot("09:00", "10:00")],
                total_slots: 1,
                date: Some("2024-06-01".to_string()),
            }),
        }));

        assert!(!chat.is_loading());
        assert_eq!(chat.messages().len(), 3);

        let reply = chat.messages().last().unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.text, "Here are the slots");

        let cards = reply.slot_cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].status_label, "Available");
        assert_eq!(cards[0].start_label, "9:00 AM");
    }

    #[test]
    fn test_failure_appends_apology() {
        let mut chat = ChatSession::new(None);
        chat.begin_send("hello").unwrap();
        chat.finish_send(Err(ClientError::Network("refused".to_string())));

        let reply = chat.messages().last().unwrap();
        assert_eq!(reply.text, FAILURE_REPLY);
        assert!(reply.slot_cards().is_empty());
        assert!(!chat.is_loading());
    }

    #[test]
    fn test_blank_and_busy_sends_ignored() {
        let mut chat = ChatSession::new(None);
        assert!(chat.begin_send("   ").is_none());

        chat.begin_send("first").unwrap();
        assert!(chat.begin_send("second").is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_select_slot_fills_input_only() {
        let mut chat = ChatSession::new(None);
        chat.select_slot(&slot("14:00", "15:00"), Some("2024-06-01"));

        assert_eq!(
            chat.input(),
            "I'd like to book the slot on 2024-06-01 from 14:00 to 15:00"
        );
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_loading());
    }
}
