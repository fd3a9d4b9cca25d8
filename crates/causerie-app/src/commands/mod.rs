//! The command layer: the application's UI boundary.
//!
//! Each sub-module groups related commands by domain as `impl App`
//! blocks.  Commands lock the shared state, apply the mutation through
//! the chat engine, run the persistence post-commit hook, and emit
//! change events — in that order.

pub mod auth;
pub mod chatrooms;
pub mod messaging;
pub mod session;
pub mod settings;
