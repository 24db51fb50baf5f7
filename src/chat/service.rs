//! Chat Service
//!
//! Sends a [`ChatSession`]'s messages through the API client.

use crate::api::ApiClient;
use crate::api::ClientResult;

use super::session::{ChatMessage, ChatSession};

/// A chat session wired to the chatbot endpoint
pub struct ChatService {
    client: ApiClient,
    session: ChatSession,
}

impl ChatService {
    pub fn new(client: ApiClient, user_id: Option<i64>) -> Self {
        Self {
            client,
            session: ChatSession::new(user_id),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    /// Send `text` and return the bot's reply, if anything was sent
    pub async fn send_message(&mut self, text: &str) -> Option<&ChatMessage> {
        let request = self.session.begin_send(text)?;
        let result = self.client.chat(&request).await;
        self.session.finish_send(result);
        self.session.messages().last()
    }

    /// Check the chatbot health endpoint
    pub async fn health(&self) -> ClientResult<String> {
        self.client.chat_health().await
    }
}
