//! v001 -- Initial schema creation.
//!
//! Creates the `snapshots` table: one JSON state blob per namespace.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Snapshots
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS snapshots (
    namespace  TEXT PRIMARY KEY NOT NULL,  -- e.g. "chat-storage", "ui-storage"
    json       TEXT NOT NULL,              -- serialized state blob
    updated_at TEXT NOT NULL               -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
