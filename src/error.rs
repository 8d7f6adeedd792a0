//! Error types for appsession.

use thiserror::Error;

/// Result type alias using appsession Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the entity, store, and config layers.
///
/// The controller itself absorbs all of these: a record that fails to
/// parse counts as "no session" and a store write that fails is logged,
/// never propagated.
#[derive(Error, Debug)]
pub enum Error {
    // Record errors
    #[error("Malformed session record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("Unsupported session record version {0}")]
    UnsupportedRecordVersion(u32),

    // Store errors
    #[error("Store lock poisoned")]
    LockPoisoned,

    #[cfg(feature = "db")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config errors
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
