//! The session lifecycle state machine.

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::ids::{IdGenerator, UuidIds};
use crate::notify::{Notifier, UpdateType};
use crate::session::Session;
use crate::store::SessionStore;

/// Owns the single current [`Session`] and drives it through the
/// active / suspended / expired lifecycle.
///
/// The controller is the only component that writes to the store or
/// publishes through the notifier. [`resume`](Self::resume) and
/// [`suspend`](Self::suspend) are not reentrant-safe against each other;
/// `&mut self` serializes them for single-threaded hosts, and a
/// concurrent host must wrap the whole controller in a mutex or a
/// single-writer task so that each load-mutate-persist-publish sequence
/// runs as one critical section.
pub struct SessionController {
    config: SessionConfig,
    session: Option<Session>,
    store: Box<dyn SessionStore>,
    notifier: Notifier,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl SessionController {
    /// Create a controller with the system clock and random UUID ids.
    ///
    /// Observers must already be subscribed on `notifier`; publishes go
    /// to whoever is registered at publish time.
    pub fn new(config: SessionConfig, store: Box<dyn SessionStore>, notifier: Notifier) -> Self {
        Self::with_parts(
            config,
            store,
            notifier,
            Box::new(SystemClock),
            Box::new(UuidIds),
        )
    }

    /// Create a controller with an explicit clock and id generator.
    pub fn with_parts(
        config: SessionConfig,
        store: Box<dyn SessionStore>,
        notifier: Notifier,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            config,
            session: None,
            store,
            notifier,
            clock,
            ids,
        }
    }

    /// The session currently held in memory, if any.
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Called when the host application becomes foreground-active.
    ///
    /// Resumes the current session if its grace period has not elapsed;
    /// otherwise invalidates it, announces the end of the episode, and
    /// starts a fresh one. Afterwards the controller always holds one
    /// valid, non-suspended session.
    pub fn resume(&mut self) {
        let current = match self.take_existing_session() {
            Some(mut session) => {
                if session.suspended {
                    self.check_expiry(&mut session);
                }

                if session.valid {
                    session.updated_at = self.clock.now_ms();
                    self.persist(&session);
                    self.notifier.publish(&session, UpdateType::Update);
                    session
                } else {
                    // The previous episode is over; announce it before
                    // replacing it.
                    self.notifier.publish(&session, UpdateType::Update);
                    self.start_fresh_session()
                }
            }
            None => self.start_fresh_session(),
        };

        self.session = Some(current);
    }

    /// Called when the host application leaves the foreground.
    ///
    /// Marks the current session suspended without touching
    /// `updated_at`: the grace period counts from the last active
    /// confirmation, not from the moment backgrounding was observed.
    /// With no current session this is a no-op.
    pub fn suspend(&mut self) {
        if let Some(mut session) = self.take_existing_session() {
            session.suspended = true;
            self.persist(&session);
            self.notifier.publish(&session, UpdateType::Update);
            self.session = Some(session);
        }
    }

    /// The current session: the in-memory instance when one exists,
    /// otherwise whatever record the store recovered from a previous
    /// process. A missing or unusable record means no session.
    fn take_existing_session(&mut self) -> Option<Session> {
        if let Some(session) = self.session.take() {
            return Some(session);
        }
        self.load_persisted_session()
    }

    fn load_persisted_session(&self) -> Option<Session> {
        let record = match self.store.get() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err) => {
                debug!("Failed to read persisted session: {}", err);
                return None;
            }
        };

        match Session::from_record(&record) {
            Ok(session) => Some(session),
            Err(err) => {
                debug!("Discarding unusable session record: {}", err);
                None
            }
        }
    }

    /// Evaluate a suspended session against the clock. Within the grace
    /// window the session resumes in place; past it the session becomes
    /// invalid. Invalid is terminal: a session loaded in that state is
    /// left untouched and gets replaced by the caller.
    fn check_expiry(&self, session: &mut Session) {
        if !session.valid {
            return;
        }
        if session.expired_at(self.clock.now_ms()) {
            session.valid = false;
            self.persist(session);
        } else {
            session.suspended = false;
        }
    }

    fn start_fresh_session(&self) -> Session {
        let session = Session::new(
            self.ids.next_id(),
            self.config.suspension_timeout_ms,
            self.clock.now_ms(),
        );
        self.persist(&session);
        self.notifier.publish(&session, UpdateType::Create);
        session
    }

    /// Back up the session to the store. Write failures are logged and
    /// swallowed: the in-memory session stays authoritative for the rest
    /// of the process lifetime, only crash-recovery fidelity degrades.
    fn persist(&self, session: &Session) {
        let record = match session.to_record() {
            Ok(record) => record,
            Err(err) => {
                warn!("Failed to serialize session {}: {}", session.id, err);
                return;
            }
        };
        if let Err(err) = self.store.put(&record) {
            warn!("Failed to persist session {}: {}", session.id, err);
        }
    }
}
