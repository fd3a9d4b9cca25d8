//! Namespaced JSON snapshot storage.
//!
//! Each persistence namespace holds one row: the full serialized state of
//! the owning store.  Mutation boundaries in the app layer save the whole
//! snapshot after commit, and startup loads whatever was saved last.  The
//! two namespaces (`chat-storage`, `ui-storage`) are fully independent.

use chrono::Utc;
use rusqlite::params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Serialize `value` and store it under `namespace`, replacing any
    /// previous snapshot.
    pub fn save_snapshot<T: Serialize>(&self, namespace: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;

        self.conn().execute(
            "INSERT OR REPLACE INTO snapshots (namespace, json, updated_at)
             VALUES (?1, ?2, ?3)",
            params![namespace, json, Utc::now().to_rfc3339()],
        )?;

        debug!(namespace, bytes = json.len(), "snapshot saved");
        Ok(())
    }

    /// Load and deserialize the snapshot stored under `namespace`.
    ///
    /// Returns `Ok(None)` when the namespace has never been saved.  A
    /// snapshot that exists but fails to deserialize is an error: the
    /// caller decides whether to start fresh or surface it.
    pub fn load_snapshot<T: DeserializeOwned>(&self, namespace: &str) -> Result<Option<T>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT json FROM snapshots WHERE namespace = ?1")?;

        let mut rows = stmt.query(params![namespace])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let json: String = row.get(0)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Delete the snapshot under `namespace`.  Returns `true` if a row was
    /// deleted.
    pub fn clear_snapshot(&self, namespace: &str) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM snapshots WHERE namespace = ?1",
            params![namespace],
        )?;
        Ok(affected > 0)
    }
}
