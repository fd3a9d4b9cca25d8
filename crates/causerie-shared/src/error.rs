use thiserror::Error;

use crate::types::ChatroomId;

/// Errors produced by the chat engine and the command layer.
///
/// None of these is fatal: validation failures are surfaced as inline
/// field errors, `Throttled` is a prevented state the UI maps to a
/// disabled send control, and `ChatroomNotFound` on an append marks a
/// caller bug (deletes on missing rooms are silent no-ops instead).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// A user-supplied field failed validation.
    #[error("Validation failed for {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// An operation referenced a chatroom id that does not exist.
    #[error("Chatroom not found: {0}")]
    ChatroomNotFound(ChatroomId),

    /// A message was submitted with no chatroom selected (or the selected
    /// id no longer resolves).
    #[error("No chatroom is currently selected")]
    NoActiveChatroom,

    /// A submission was attempted while a simulated reply is pending or
    /// cooling down.  Refused silently; nothing is appended.
    #[error("A reply is already in flight for this chatroom")]
    Throttled,

    /// The verification oracle rejected a well-formed one-time code.
    #[error("The one-time code was rejected")]
    CodeRejected,
}

impl ChatError {
    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
