//! appsession - Application session lifecycle tracking
//!
//! Tracks a host application's usage session across foreground/background
//! transitions. Brief backgrounding keeps the session alive for a
//! configurable grace period; longer absences end it and start a new one.
//!
//! - **session**: the session entity and the lifecycle state machine
//! - **store**: durable single-record persistence for crash recovery
//! - **notify**: publish/subscribe delivery of lifecycle transitions
//! - **config**: controller configuration
//! - **clock** / **ids**: injectable time and identifier sources
//!
//! Host wiring follows the platform lifecycle: subscribe observers on a
//! [`Notifier`], construct a [`SessionController`], then call
//! [`SessionController::resume`] whenever the app becomes
//! foreground-active and [`SessionController::suspend`] when it leaves
//! the foreground.

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod notify;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use ids::{IdGenerator, UuidIds};
pub use notify::{LogObserver, Notifier, SessionObserver, UpdateType};
pub use session::{Session, SessionController};
#[cfg(feature = "db")]
pub use store::SqliteStore;
pub use store::{FileStore, MemoryStore, SessionStore};
