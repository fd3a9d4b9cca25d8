//! Chatroom registry commands: create, delete, list, find.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use causerie_chat::seed;
use causerie_shared::{ChatError, Chatroom, ChatroomId};

use crate::commands::messaging::MessageDto;
use crate::events::AppEvent;
use crate::state::{App, AppState};

/// Chatroom view handed to the UI: registry metadata plus the derived
/// message count and the latest message preview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatroomDto {
    pub id: ChatroomId,
    pub title: String,
    pub created_at: i64,
    pub message_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageDto>,
}

impl ChatroomDto {
    pub(crate) fn from_room(room: &Chatroom, state: &AppState) -> Self {
        Self {
            id: room.id,
            title: room.title.clone(),
            created_at: room.created_at,
            message_count: state.store.message_count(room.id),
            last_message: state.store.last_message(room.id).map(MessageDto::from),
        }
    }
}

impl App {
    /// Create an empty chatroom.  The title must be 1..=50 characters.
    pub fn create_chatroom(&self, title: &str) -> Result<ChatroomDto, ChatError> {
        let (dto, event) = {
            let mut state = self.state();
            let room = state.store.create_chatroom(title)?;
            self.persist_chat(&state);

            let event = AppEvent::ChatroomCreated {
                chatroom_id: room.id.to_string(),
                title: room.title.clone(),
            };
            (ChatroomDto::from_room(&room, &state), event)
        };

        self.emit(event);
        Ok(dto)
    }

    /// Create a chatroom pre-populated with synthetic demo history.
    ///
    /// Seeding is an explicit choice; [`create_chatroom`](Self::create_chatroom)
    /// never seeds on its own.
    pub fn create_chatroom_seeded(&self, title: &str) -> Result<ChatroomDto, ChatError> {
        let (dto, event) = {
            let mut state = self.state();
            let room = state.store.create_chatroom(title)?;

            let mut rng = StdRng::from_entropy();
            seed::seed_chatroom(&mut state.store, room.id, &mut rng)?;
            self.persist_chat(&state);

            let event = AppEvent::ChatroomCreated {
                chatroom_id: room.id.to_string(),
                title: room.title.clone(),
            };
            (ChatroomDto::from_room(&room, &state), event)
        };

        self.emit(event);
        Ok(dto)
    }

    /// Delete a chatroom: cancel its pending reply (if any), drop its
    /// gate, cascade to the message log, and clear the session reference
    /// when it pointed at the deleted room.  Idempotent.
    pub fn delete_chatroom(&self, id: ChatroomId) {
        let (was_active, existed) = {
            let mut state = self.state();
            let existed = state.store.find_chatroom(id).is_some();
            let was_active = state.store.current() == Some(id);

            self.cancel_pending(id, &mut state);
            state.gates.remove(&id);
            state.store.delete_chatroom(id);

            if existed {
                self.persist_chat(&state);
            }
            (was_active, existed)
        };

        if existed {
            info!(chatroom = %id, "chatroom deleted via command");
            self.emit(AppEvent::ChatroomDeleted {
                chatroom_id: id.to_string(),
            });
            if was_active {
                self.emit(AppEvent::SessionChanged { chatroom_id: None });
            }
        }
    }

    /// All chatrooms in creation order.
    pub fn list_chatrooms(&self) -> Vec<ChatroomDto> {
        let state = self.state();
        state
            .store
            .chatrooms()
            .iter()
            .map(|room| ChatroomDto::from_room(room, &state))
            .collect()
    }

    pub fn find_chatroom(&self, id: ChatroomId) -> Option<ChatroomDto> {
        let state = self.state();
        state
            .store
            .find_chatroom(id)
            .map(|room| ChatroomDto::from_room(room, &state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causerie_shared::constants::SEED_MESSAGE_COUNT;

    #[tokio::test]
    async fn test_create_returns_exact_title_and_consistent_count() {
        let app = App::new();
        let room = app.create_chatroom("Test").unwrap();

        assert_eq!(room.title, "Test");
        assert_eq!(room.message_count, 0);
        assert!(room.last_message.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_titles() {
        let app = App::new();

        assert!(app.create_chatroom("").is_err());
        assert!(app.create_chatroom(&"x".repeat(51)).is_err());
        assert!(app.create_chatroom(&"x".repeat(50)).is_ok());
    }

    #[tokio::test]
    async fn test_seeded_create_reports_derived_count() {
        let app = App::new();
        let room = app.create_chatroom_seeded("Demo").unwrap();

        assert_eq!(room.message_count, SEED_MESSAGE_COUNT);
        assert!(room.last_message.is_some());
    }

    #[tokio::test]
    async fn test_delete_then_find_returns_none() {
        let app = App::new();
        let room = app.create_chatroom("Doomed").unwrap();

        app.delete_chatroom(room.id);

        assert!(app.find_chatroom(room.id).is_none());
        assert!(app.page_messages(room.id, 1).is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_matches_delete_once() {
        let app = App::new();
        let room = app.create_chatroom("Doomed").unwrap();

        app.delete_chatroom(room.id);
        app.delete_chatroom(room.id);

        assert!(app.list_chatrooms().is_empty());
    }

    #[tokio::test]
    async fn test_delete_active_room_clears_session_and_emits() {
        let app = App::new();
        let mut rx = app.subscribe();
        let room = app.create_chatroom("Active").unwrap();
        app.select_chatroom(Some(room.id));

        app.delete_chatroom(room.id);

        assert_eq!(app.current_chatroom(), None);

        // created, session, deleted, session-cleared
        let mut saw_cleared = false;
        while let Ok(event) = rx.try_recv() {
            if event == (AppEvent::SessionChanged { chatroom_id: None }) {
                saw_cleared = true;
            }
        }
        assert!(saw_cleared);
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let app = App::new();
        let a = app.create_chatroom("a").unwrap();
        let b = app.create_chatroom("b").unwrap();

        let titles: Vec<_> = app.list_chatrooms().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_ne!(a.id, b.id);
    }
}
