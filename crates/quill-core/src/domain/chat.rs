use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identity;

/// Room shared by every signed-out visitor.
pub const GUEST_ROOM: &str = "guest";

/// Chat room of the caller: their uid when signed in, otherwise the guest room.
pub fn chat_room(identity: Option<&Identity>) -> &str {
    identity.map_or(GUEST_ROOM, |identity| identity.uid.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    #[default]
    User,
}

/// One entry of a chat room log, stored under `chatrooms/{room}/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub sender: ChatSender,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub text: String,
    pub sender: ChatSender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_follows_sign_in_state() {
        let identity = Identity::new("u42", "a@example.com");

        assert_eq!(chat_room(Some(&identity)), "u42");
        assert_eq!(chat_room(None), GUEST_ROOM);
    }

    #[test]
    fn test_sender_wire_form() {
        let json = serde_json::to_value(ChatSender::User).unwrap();
        assert_eq!(json, "user");
    }
}
