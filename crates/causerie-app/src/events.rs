//! Change events emitted toward UI observers.
//!
//! Every mutating command emits one or more [`AppEvent`]s after commit.
//! Observers subscribe through [`EventBus::subscribe`]; emission never
//! blocks and never fails the mutation — an event with no listeners is
//! simply dropped.

use serde::Serialize;
use tokio::sync::broadcast;

use causerie_shared::Sender;

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum AppEvent {
    #[serde(rename_all = "camelCase")]
    ChatroomCreated { chatroom_id: String, title: String },

    #[serde(rename_all = "camelCase")]
    ChatroomDeleted { chatroom_id: String },

    #[serde(rename_all = "camelCase")]
    NewMessage {
        chatroom_id: String,
        message_id: String,
        sender: Sender,
    },

    #[serde(rename_all = "camelCase")]
    TypingChanged { is_typing: bool },

    #[serde(rename_all = "camelCase")]
    SessionChanged { chatroom_id: Option<String> },

    #[serde(rename_all = "camelCase")]
    DarkModeChanged { dark_mode: bool },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        // Err here only means nobody is listening right now.
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
