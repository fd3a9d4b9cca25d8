//! Active-session commands.
//!
//! The selection is a weak reference: it may point at a room that has
//! since been deleted, and `current_chatroom` returns the stored id
//! regardless.  Navigating away from a room cancels its scheduled reply
//! so a stale AI message can never land in a conversation the user left.

use tracing::debug;

use causerie_shared::ChatroomId;

use crate::events::AppEvent;
use crate::state::App;

impl App {
    /// Select the active chatroom (or clear the selection with `None`).
    pub fn select_chatroom(&self, id: Option<ChatroomId>) {
        let changed = {
            let mut state = self.state();
            let previous = state.store.current();
            if previous == id {
                return;
            }

            if let Some(prev) = previous {
                self.cancel_pending(prev, &mut state);
            }

            state.store.set_current(id);
            self.persist_chat(&state);
            debug!(from = ?previous, to = ?id, "active chatroom changed");
            true
        };

        if changed {
            self.emit(AppEvent::SessionChanged {
                chatroom_id: id.map(|id| id.to_string()),
            });
        }
    }

    /// The stored active-chatroom id.  Callers must treat an id that no
    /// longer resolves as "no chatroom".
    pub fn current_chatroom(&self) -> Option<ChatroomId> {
        self.state().store.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_and_clear() {
        let app = App::new();
        let room = app.create_chatroom("Room").unwrap();

        app.select_chatroom(Some(room.id));
        assert_eq!(app.current_chatroom(), Some(room.id));

        app.select_chatroom(None);
        assert_eq!(app.current_chatroom(), None);
    }

    #[tokio::test]
    async fn test_reselecting_same_room_emits_nothing() {
        let app = App::new();
        let room = app.create_chatroom("Room").unwrap();
        app.select_chatroom(Some(room.id));

        let mut rx = app.subscribe();
        app.select_chatroom(Some(room.id));

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_deleted_selection_cannot_be_reselected_meaningfully() {
        let app = App::new();
        let room = app.create_chatroom("Room").unwrap();
        app.delete_chatroom(room.id);

        // The weak reference is stored as-is; resolution fails.
        app.select_chatroom(Some(room.id));
        assert_eq!(app.current_chatroom(), Some(room.id));
        assert!(app.find_chatroom(room.id).is_none());
    }
}
