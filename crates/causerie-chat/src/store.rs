//! The chat store: chatroom registry, message logs, session selector.
//!
//! [`ChatStore`] is an explicit owned state object — there is no global
//! singleton.  The application shell wraps one instance in its shared
//! state and routes every mutation through the methods here, so log
//! length and the derived message count can never drift apart.
//!
//! The struct serializes as a whole; its serialized form is exactly the
//! chat persistence namespace (`chatrooms`, `current_chatroom`,
//! `messages`, `is_typing`).

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use causerie_shared::constants::{PAGE_SIZE, TITLE_MAX_CHARS};
use causerie_shared::{ChatError, Chatroom, ChatroomId, Message};

/// In-memory chat state.  One message log per chatroom id, registry in
/// insertion order, plus the active-session reference and typing flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStore {
    chatrooms: Vec<Chatroom>,
    current_chatroom: Option<ChatroomId>,
    messages: HashMap<ChatroomId, Vec<Message>>,
    is_typing: bool,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Chatroom registry
    // ------------------------------------------------------------------

    /// Create a chatroom with the given title.
    ///
    /// The title must be 1..=50 characters.  New rooms start with an
    /// empty message log; the message count is derived from the log and
    /// therefore starts at zero.
    pub fn create_chatroom(&mut self, title: &str) -> Result<Chatroom, ChatError> {
        let len = title.chars().count();
        if len == 0 {
            return Err(ChatError::validation("title", "Title is required"));
        }
        if len > TITLE_MAX_CHARS {
            return Err(ChatError::validation(
                "title",
                format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            ));
        }

        let chatroom = Chatroom {
            id: ChatroomId::new(),
            title: title.to_string(),
            created_at: Utc::now().timestamp_millis(),
        };

        self.messages.insert(chatroom.id, Vec::new());
        self.chatrooms.push(chatroom.clone());

        info!(id = %chatroom.id, title = %chatroom.title, "Chatroom created");
        Ok(chatroom)
    }

    /// Delete a chatroom, its message log, and — if it was active — the
    /// session reference.  Idempotent: deleting an unknown id is a no-op.
    pub fn delete_chatroom(&mut self, id: ChatroomId) {
        let before = self.chatrooms.len();
        self.chatrooms.retain(|room| room.id != id);
        self.messages.remove(&id);

        if self.current_chatroom == Some(id) {
            self.current_chatroom = None;
        }

        if self.chatrooms.len() < before {
            info!(%id, "Chatroom deleted");
        } else {
            debug!(%id, "Delete of unknown chatroom ignored");
        }
    }

    /// All chatrooms, in insertion order.
    pub fn chatrooms(&self) -> &[Chatroom] {
        &self.chatrooms
    }

    pub fn find_chatroom(&self, id: ChatroomId) -> Option<&Chatroom> {
        self.chatrooms.iter().find(|room| room.id == id)
    }

    // ------------------------------------------------------------------
    // Message log
    // ------------------------------------------------------------------

    /// Append a message to a chatroom's log.
    ///
    /// Appending to a non-existent chatroom is a caller bug and fails
    /// loudly with [`ChatError::ChatroomNotFound`].
    pub fn append_message(&mut self, id: ChatroomId, message: Message) -> Result<(), ChatError> {
        if self.find_chatroom(id).is_none() {
            return Err(ChatError::ChatroomNotFound(id));
        }

        debug!(chatroom = %id, message = %message.id, sender = ?message.sender, "Message appended");
        self.messages.entry(id).or_default().push(message);
        Ok(())
    }

    /// The full log for a chatroom, in append order.  Empty for unknown
    /// ids.
    pub fn messages(&self, id: ChatroomId) -> &[Message] {
        self.messages.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Derived message count — always the true log length.
    pub fn message_count(&self, id: ChatroomId) -> usize {
        self.messages.get(&id).map_or(0, Vec::len)
    }

    /// The most recently appended message, if any.
    pub fn last_message(&self, id: ChatroomId) -> Option<&Message> {
        self.messages.get(&id).and_then(|log| log.last())
    }

    /// The `page`-th most-recent window of messages (pages start at 1),
    /// using the default page size of 20.
    ///
    /// Within the slice the original append order is preserved; a page
    /// beyond the available range is empty, not an error.
    pub fn page_messages(&self, id: ChatroomId, page: usize) -> &[Message] {
        self.page_messages_with_size(id, page, PAGE_SIZE)
    }

    /// Like [`page_messages`](Self::page_messages) with an explicit page
    /// size.  Page `p` covers `[max(0, n - p*size), n - (p-1)*size)`.
    pub fn page_messages_with_size(
        &self,
        id: ChatroomId,
        page: usize,
        size: usize,
    ) -> &[Message] {
        let Some(log) = self.messages.get(&id) else {
            return &[];
        };
        if page == 0 || size == 0 {
            return &[];
        }

        let n = log.len();
        let skip = (page - 1) * size;
        if skip >= n {
            return &[];
        }

        let end = n - skip;
        let start = end.saturating_sub(size);
        &log[start..end]
    }

    // ------------------------------------------------------------------
    // Session selector
    // ------------------------------------------------------------------

    /// Select the active chatroom (or none).
    ///
    /// The reference is weak: the selected room may be deleted later, and
    /// callers are expected to treat a dangling id as "no chatroom".
    pub fn set_current(&mut self, id: Option<ChatroomId>) {
        self.current_chatroom = id;
    }

    /// The stored active-chatroom id, dangling or not.
    pub fn current(&self) -> Option<ChatroomId> {
        self.current_chatroom
    }

    /// The active chatroom id, resolved against the registry: `None` when
    /// nothing is selected or the selection no longer exists.
    pub fn current_resolved(&self) -> Option<ChatroomId> {
        self.current_chatroom
            .filter(|id| self.find_chatroom(*id).is_some())
    }

    // ------------------------------------------------------------------
    // Typing flag
    // ------------------------------------------------------------------

    pub fn set_typing(&mut self, is_typing: bool) {
        self.is_typing = is_typing;
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }
}
