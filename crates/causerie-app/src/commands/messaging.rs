//! Messaging commands: the send flow, transcript pagination, typing.
//!
//! `send_message` is the conversation engine's entry point.  Admission is
//! checked before anything is appended: a submission while the gate is
//! not idle is refused outright and leaves the store untouched.  Admitted
//! messages append immediately; the simulated reply is a spawned task
//! that sleeps through the thinking delay, appends the AI message, then
//! walks the gate through its cooldown.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use causerie_chat::GateState;
use causerie_shared::constants::REPLY_COOLDOWN_MS;
use causerie_shared::{ChatError, ChatroomId, Message, MessageId, Sender};

use crate::events::AppEvent;
use crate::state::App;

/// Message view handed to the UI.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&Message> for MessageDto {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id,
            content: m.content.clone(),
            sender: m.sender,
            timestamp: m.timestamp,
            image: m.image.clone(),
        }
    }
}

impl App {
    /// Submit a user message to the active chatroom.
    ///
    /// Fails with [`ChatError::NoActiveChatroom`] when nothing usable is
    /// selected and with [`ChatError::Throttled`] while a reply is in
    /// flight or cooling down — the latter is a prevented state the UI
    /// maps to a disabled send control, not an error dialog.
    pub fn send_message(
        &self,
        content: &str,
        image: Option<String>,
    ) -> Result<MessageDto, ChatError> {
        let trimmed = content.trim();
        if trimmed.is_empty() && image.is_none() {
            return Err(ChatError::validation("message", "Message is empty"));
        }

        let (message, room_id, reply, delay) = {
            let mut state = self.state();
            let room_id = state
                .store
                .current_resolved()
                .ok_or(ChatError::NoActiveChatroom)?;

            let gate = state.gates.entry(room_id).or_default();
            if !gate.try_admit() {
                debug!(chatroom = %room_id, "submission refused by throttle gate");
                return Err(ChatError::Throttled);
            }

            let message = Message::user(trimmed, image);
            if let Err(err) = state.store.append_message(room_id, message.clone()) {
                // current_resolved() above guarantees the room exists, so
                // this cannot happen while the lock is held; restore the
                // gate before surfacing it anyway.
                if let Some(gate) = state.gates.get_mut(&room_id) {
                    gate.reset();
                }
                return Err(err);
            }

            state.store.set_typing(true);
            let reply = state.simulator.pick_reply(trimmed);
            let delay = state.simulator.thinking_delay();
            self.persist_chat(&state);

            (message, room_id, reply, delay)
        };

        self.emit(AppEvent::NewMessage {
            chatroom_id: room_id.to_string(),
            message_id: message.id.to_string(),
            sender: Sender::User,
        });
        self.emit(AppEvent::TypingChanged { is_typing: true });

        self.schedule_reply(room_id, reply, delay);
        Ok(MessageDto::from(&message))
    }

    /// Spawn the delayed-reply task for an admitted submission and retain
    /// its handle so teardown can abort it.
    fn schedule_reply(&self, room_id: ChatroomId, reply: String, delay: Duration) {
        debug!(chatroom = %room_id, delay_ms = delay.as_millis() as u64, "reply scheduled");

        let app = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let delivered = {
                let mut state = app.state();
                // The room can only vanish together with an abort of this
                // task, but re-check before touching the log.
                if state.store.find_chatroom(room_id).is_none() {
                    state.gates.remove(&room_id);
                    None
                } else {
                    let message = Message::ai(reply);
                    match state.store.append_message(room_id, message.clone()) {
                        Ok(()) => {
                            state.store.set_typing(false);
                            if let Some(gate) = state.gates.get_mut(&room_id) {
                                gate.reply_delivered();
                            }
                            app.persist_chat(&state);
                            Some(message)
                        }
                        Err(_) => None,
                    }
                }
            };

            let Some(message) = delivered else {
                app.pending().remove(&room_id);
                return;
            };

            app.emit(AppEvent::NewMessage {
                chatroom_id: room_id.to_string(),
                message_id: message.id.to_string(),
                sender: Sender::Ai,
            });
            app.emit(AppEvent::TypingChanged { is_typing: false });

            // The reply landed; the task is no longer cancellable work.
            app.pending().remove(&room_id);

            tokio::time::sleep(Duration::from_millis(REPLY_COOLDOWN_MS)).await;

            let mut state = app.state();
            if let Some(gate) = state.gates.get_mut(&room_id) {
                // Teardown during the cooldown already reset the gate.
                if gate.state() == GateState::Cooldown {
                    gate.cooldown_elapsed();
                }
            }
        });

        self.pending().insert(room_id, handle);
    }

    /// The `page`-th most-recent transcript window for a chatroom
    /// (pages start at 1, 20 messages each, append order preserved
    /// inside the window).
    pub fn page_messages(&self, chatroom_id: ChatroomId, page: usize) -> Vec<MessageDto> {
        let state = self.state();
        state
            .store
            .page_messages(chatroom_id, page)
            .iter()
            .map(MessageDto::from)
            .collect()
    }

    /// Number of messages in a chatroom (derived from the log).
    pub fn message_count(&self, chatroom_id: ChatroomId) -> usize {
        self.state().store.message_count(chatroom_id)
    }

    /// Whether a simulated reply is currently being "typed".
    pub fn is_typing(&self) -> bool {
        self.state().store.is_typing()
    }
}
