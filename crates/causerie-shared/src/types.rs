use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChatroomId(pub Uuid);

impl ChatroomId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChatroomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChatroomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One immutable turn in a conversation.
///
/// Messages are owned exclusively by the chat store under their chatroom
/// key.  Timestamps are advisory display data (epoch milliseconds); log
/// position, not the timestamp, is the ordering authority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Opaque attached-image reference (e.g. a data URL), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Message {
    /// Build a user-authored message stamped with the current time.
    pub fn user(content: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now().timestamp_millis(),
            image,
        }
    }

    /// Build an AI-authored message stamped with the current time.
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender: Sender::Ai,
            timestamp: Utc::now().timestamp_millis(),
            image: None,
        }
    }
}

/// A named conversation container.
///
/// The message count is NOT stored here: it is always derived from the
/// chat store's log so the two can never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chatroom {
    pub id: ChatroomId,
    pub title: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// The signed-in user produced by the verification oracle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub phone: String,
    pub country_code: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(MessageId::new()));
        }
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"ai\"");
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hello", None);
        assert_eq!(user.sender, Sender::User);
        assert!(user.image.is_none());

        let ai = Message::ai("hi there");
        assert_eq!(ai.sender, Sender::Ai);
        assert!(ai.timestamp >= user.timestamp);
    }
}
