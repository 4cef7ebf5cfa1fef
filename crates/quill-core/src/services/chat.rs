//! Assistant chat log use cases.

use std::sync::Arc;

use crate::domain::{ChatMessage, ChatSender, Identity, NewChatMessage, chat_room};
use crate::error::DomainError;
use crate::ports::MessageStore;

/// Chat log of the caller's room. Signed-out callers share the guest room.
#[derive(Clone)]
pub struct ChatService {
    messages: Arc<dyn MessageStore>,
}

impl ChatService {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }

    pub async fn send(
        &self,
        identity: Option<&Identity>,
        text: String,
    ) -> Result<ChatMessage, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("Message cannot be empty".to_string()));
        }

        let room = chat_room(identity);
        let message = NewChatMessage {
            text,
            sender: ChatSender::User,
        };
        Ok(self.messages.append(room, message).await?)
    }

    pub async fn history(&self, identity: Option<&Identity>) -> Result<Vec<ChatMessage>, DomainError> {
        Ok(self.messages.list(chat_room(identity)).await?)
    }
}
