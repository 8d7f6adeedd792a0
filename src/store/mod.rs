//! Durable persistence of the current session record.
//!
//! The store is a crash-recovery backstop, not a source of truth: while
//! the process is alive the controller's in-memory session wins, and the
//! stored copy may lag by one mutation if a write fails. Exactly one
//! record is kept, last write wins.

mod file;
#[cfg(feature = "db")]
mod sqlite;

pub use file::FileStore;
#[cfg(feature = "db")]
pub use sqlite::SqliteStore;

use std::sync::Mutex;

use crate::error::{Error, Result};

/// Key-value persistence of exactly one serialized session record.
///
/// `put` must overwrite atomically: a crash mid-write may lose the new
/// record but must never expose a partial one.
pub trait SessionStore {
    /// Durably overwrite the stored record.
    fn put(&self, record: &str) -> Result<()>;

    /// Return the last stored record, or `None` if nothing was stored.
    fn get(&self) -> Result<Option<String>>;
}

/// In-memory store.
///
/// No crash recovery; useful for tests and for hosts that explicitly do
/// not want sessions to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn put(&self, record: &str) -> Result<()> {
        let mut slot = self.record.lock().map_err(|_| Error::LockPoisoned)?;
        *slot = Some(record.to_string());
        Ok(())
    }

    fn get(&self) -> Result<Option<String>> {
        let slot = self.record.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.put("one").unwrap();
        store.put("two").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("two"));
    }
}
