//! Demo seeding: synthetic conversation history for UI population.
//!
//! Seeding is never implicit — a freshly created chatroom is empty until
//! the caller explicitly asks for demo content.  The derived message
//! count picks the seeded messages up like any other append, so there is
//! no separate count to keep in sync.

use chrono::Utc;
use rand::Rng;
use tracing::info;

use causerie_shared::constants::{SEED_MESSAGE_COUNT, SEED_TIME_SPREAD_MS};
use causerie_shared::{ChatError, ChatroomId, Message, MessageId, Sender};

const SEED_USER_LINES: [&str; 4] = ["Hello!", "How are you?", "Can you help me?", "Thanks!"];

const SEED_AI_LINES: [&str; 4] = [
    "Hello! How can I help you today?",
    "I'm doing well, thank you!",
    "Of course! What do you need help with?",
    "You're welcome!",
];

/// Generate `count` synthetic messages with timestamps spread over the
/// last half hour, oldest first.
pub fn generate_seed_messages<R: Rng>(rng: &mut R, count: usize) -> Vec<Message> {
    let now = Utc::now().timestamp_millis();
    let step = SEED_TIME_SPREAD_MS / count.max(1) as i64;

    let mut messages = Vec::with_capacity(count);
    for i in 0..count {
        let is_user = rng.gen_bool(0.4);
        let line_idx = rng.gen_range(0..4);
        let (sender, content) = if is_user {
            (
                Sender::User,
                format!("User message {}: {}", i + 1, SEED_USER_LINES[line_idx]),
            )
        } else {
            (
                Sender::Ai,
                format!("AI response {}: {}", i + 1, SEED_AI_LINES[line_idx]),
            )
        };

        let age = (count - i) as i64 * step;
        let jitter = rng.gen_range(0..step.max(1));

        messages.push(Message {
            id: MessageId::new(),
            content,
            sender,
            timestamp: now - age + jitter,
            image: None,
        });
    }

    messages
}

/// Append [`SEED_MESSAGE_COUNT`] synthetic messages to an existing
/// chatroom.  Returns the number of messages added.
pub fn seed_chatroom<R: Rng>(
    store: &mut crate::ChatStore,
    id: ChatroomId,
    rng: &mut R,
) -> Result<usize, ChatError> {
    let messages = generate_seed_messages(rng, SEED_MESSAGE_COUNT);
    let count = messages.len();

    for message in messages {
        store.append_message(id, message)?;
    }

    info!(chatroom = %id, count, "Demo messages seeded");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChatStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        let messages = generate_seed_messages(&mut rng, 50);

        assert_eq!(messages.len(), 50);
        let ids: HashSet<_> = messages.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_content_follows_sender_corpus() {
        let mut rng = StdRng::seed_from_u64(2);
        for message in generate_seed_messages(&mut rng, 50) {
            match message.sender {
                Sender::User => assert!(message.content.starts_with("User message ")),
                Sender::Ai => assert!(message.content.starts_with("AI response ")),
            }
        }
    }

    #[test]
    fn test_seed_chatroom_updates_derived_count() {
        let mut store = ChatStore::new();
        let room = store.create_chatroom("Demo").unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let added = seed_chatroom(&mut store, room.id, &mut rng).unwrap();

        assert_eq!(added, SEED_MESSAGE_COUNT);
        assert_eq!(store.message_count(room.id), SEED_MESSAGE_COUNT);
    }

    #[test]
    fn test_seed_unknown_room_fails() {
        let mut store = ChatStore::new();
        let mut rng = StdRng::seed_from_u64(4);

        assert!(seed_chatroom(&mut store, ChatroomId::new(), &mut rng).is_err());
    }

    #[test]
    fn test_appends_after_seed_keep_counting() {
        let mut store = ChatStore::new();
        let room = store.create_chatroom("Demo").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        seed_chatroom(&mut store, room.id, &mut rng).unwrap();

        for _ in 0..3 {
            store
                .append_message(room.id, Message::user("more", None))
                .unwrap();
        }

        assert_eq!(store.message_count(room.id), SEED_MESSAGE_COUNT + 3);
    }
}
