//! Key-value persistence layer backed by SQLite.
//!
//! Every repository mirrors its whole in-memory list into one named blob
//! here on each mutation. The store itself is deliberately dumb: string
//! keys to string values, a miss is `None`, never an error.

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Storage schema: a single key-value table.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS local_storage (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Local key-value store wrapping a SQLite connection.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open the store at path, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize schema.
    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Load the value stored under `key`. An absent key is a plain `None`.
    pub fn load(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn save(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            [key, value],
        )?;
        Ok(())
    }

    /// Remove `key` if present. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let store = LocalStore::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_miss_is_none() {
        let store = LocalStore::open_in_memory().unwrap();
        assert_eq!(store.load("nothing").unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("greeting", "hola").unwrap();
        assert_eq!(store.load("greeting").unwrap(), Some("hola".into()));
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("counter", "1").unwrap();
        store.save("counter", "2").unwrap();
        assert_eq!(store.load("counter").unwrap(), Some("2".into()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("session", "{}").unwrap();
        store.remove("session").unwrap();
        assert_eq!(store.load("session").unwrap(), None);
        // A second remove of the same key is fine.
        store.remove("session").unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let store = LocalStore::open_in_memory().unwrap();
        store.save("a", "uno").unwrap();
        store.save("b", "dos").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap(), Some("dos".into()));
    }
}
