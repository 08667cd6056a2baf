//! SQLite-backed key-value slot.
//!
//! # Invariants
//! - The wrapped connection is always bootstrapped via `db::open_*`.
//! - Writes upsert one row; each call is its own implicit transaction.

use super::{KeyValueStore, KvResult};
use crate::db::{open_db, open_db_in_memory};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key-value store persisted in the `kv_store` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps a connection that has already been opened with `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
