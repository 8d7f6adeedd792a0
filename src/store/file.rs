//! File-backed session store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::SessionStore;

/// Stores the session record in a single file.
///
/// Writes go to a sibling temp file first and are renamed over the
/// target; a crash mid-write leaves either the old record or the new
/// one, never a partial record.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store the record at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the record under the per-user data directory,
    /// e.g. `~/.local/share/<app>/session.json` on Linux.
    pub fn in_default_location(app: &str) -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(app).join("session.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn put(&self, record: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, record)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
