//! SQLite-backed session store.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::store::SessionStore;

const STORE_KEY: &str = "session";

/// Stores the session record in a single-row table of a SQLite database.
///
/// Thread-safe via internal Mutex; the row-level upsert makes the
/// overwrite atomic.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database at `path`, creating the table if needed.
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database. No crash recovery; mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session (key TEXT PRIMARY KEY, record TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SessionStore for SqliteStore {
    fn put(&self, record: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute(
            "INSERT INTO session (key, record) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET record = excluded.record",
            params![STORE_KEY, record],
        )?;
        Ok(())
    }

    fn get(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        let record = conn
            .query_row(
                "SELECT record FROM session WHERE key = ?1",
                params![STORE_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store_starts_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_last_write_wins() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.put("one").unwrap();
        store.put("two").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.put("persisted").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("persisted"));
    }
}
