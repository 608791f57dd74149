//! Wholesale blob access over the `kv_store` table.
//!
//! This is the complete data API of the storage layer: named blobs read
//! whole and replaced whole, exactly like the web front end's key-value
//! storage. There is no partial-update path.
//!
//! # Invariants
//! - `write_blob` upserts; concurrent writers are not coordinated beyond
//!   SQLite's own serialization, so the last writer wins per key.
//! - Payload contents are opaque here; decoding and corruption recovery
//!   belong to the repositories.

use super::DbResult;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Reads one named blob, or `None` when the key was never written.
pub fn read_blob(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

/// Replaces one named blob wholesale.
pub fn write_blob(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value)
         VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![key, value],
    )?;
    debug!(
        "event=blob_write module=db status=ok key={key} bytes={}",
        value.len()
    );
    Ok(())
}

/// Removes one named blob. Missing keys are a no-op.
pub fn delete_blob(conn: &Connection, key: &str) -> DbResult<()> {
    conn.execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
    Ok(())
}
