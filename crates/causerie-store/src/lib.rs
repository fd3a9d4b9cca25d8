//! # causerie-store
//!
//! Local persistence for the Causerie application, backed by SQLite.
//!
//! State is saved as JSON snapshots under independent namespaces (one for
//! the chat state, one for UI settings), so each store can be rehydrated
//! and re-saved without touching the other.  The crate exposes a
//! synchronous [`Database`] handle that wraps a `rusqlite::Connection`
//! and runs schema migrations on open.

pub mod database;
pub mod migrations;
pub mod snapshots;

mod error;

pub use database::Database;
pub use error::StoreError;
