//! Session tracking core.
//!
//! One session covers one period of continuous-enough use. The
//! controller drives it through three states, encoded in the entity's
//! `valid`/`suspended` flags:
//!
//! ```text
//! resume()
//!    │
//!    ▼
//! ┌────────┐      suspend()       ┌───────────┐
//! │ Active │ ────────────────────►│ Suspended │
//! └────────┘                      └───────────┘
//!    ▲                                  │
//!    │  resume() within grace period    │
//!    ├──────────────────────────────────┤
//!    │                                  │ resume() after grace period
//!    │                                  ▼
//!    │  fresh session            ┌─────────┐
//!    └───────────────────────────│ Expired │
//!              (CREATE)          └─────────┘
//! ```
//!
//! Expiry is evaluated lazily on the next `resume()`, never on a timer,
//! and an expired session is always replaced within the same call.

mod controller;
mod entity;

pub use controller::SessionController;
pub use entity::{RECORD_VERSION, Session};
