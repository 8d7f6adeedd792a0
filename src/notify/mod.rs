//! Publish/subscribe delivery of session lifecycle events.
//!
//! The controller publishes every transition as a `(Session, UpdateType)`
//! pair to observers registered ahead of time. Delivery is synchronous
//! and in registration order, so a slow observer delays the
//! `resume()`/`suspend()` caller.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::Session;

/// Kind of lifecycle transition being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateType {
    /// A new session started.
    Create,
    /// An existing session changed: suspended, resumed, refreshed, or
    /// invalidated. Observers inspect [`Session::valid`] to detect
    /// end-of-session.
    Update,
}

/// Receives session lifecycle events.
pub trait SessionObserver {
    fn on_session_event(&self, session: &Session, update: UpdateType);
}

struct FnObserver<F>(F);

impl<F> SessionObserver for FnObserver<F>
where
    F: Fn(&Session, UpdateType),
{
    fn on_session_event(&self, session: &Session, update: UpdateType) {
        (self.0)(session, update)
    }
}

/// Publish/subscribe channel for session updates.
///
/// Observers are registered during host setup, before the controller
/// handles its first lifecycle call; publishes go to whoever is
/// registered at that moment.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Registration order is delivery order.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Register a closure as an observer.
    pub fn subscribe_fn(&mut self, f: impl Fn(&Session, UpdateType) + 'static) {
        self.observers.push(Box::new(FnObserver(f)));
    }

    /// Deliver the event to every registered observer before returning.
    pub fn publish(&self, session: &Session, update: UpdateType) {
        for observer in &self.observers {
            observer.on_session_event(session, update);
        }
    }
}

/// Observer that logs every transition via `tracing`.
///
/// Start-of-session arrives as [`UpdateType::Create`]; end-of-session as
/// an [`UpdateType::Update`] whose session is no longer valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SessionObserver for LogObserver {
    fn on_session_event(&self, session: &Session, update: UpdateType) {
        match update {
            UpdateType::Create => {
                info!("Session {} started", session.id);
            }
            UpdateType::Update if !session.valid => {
                info!("Session {} ended", session.id);
            }
            UpdateType::Update if session.suspended => {
                info!("Session {} suspended", session.id);
            }
            UpdateType::Update => {
                info!("Session {} active", session.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> Session {
        Session::new("s-1".to_string(), 1000, 0)
    }

    #[test]
    fn test_publish_delivers_in_registration_order() {
        let seen: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let mut notifier = Notifier::new();

        let first = Rc::clone(&seen);
        notifier.subscribe_fn(move |_: &Session, _: UpdateType| first.borrow_mut().push("first"));
        let second = Rc::clone(&seen);
        notifier.subscribe_fn(move |_: &Session, _: UpdateType| second.borrow_mut().push("second"));

        notifier.publish(&session(), UpdateType::Create);
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_publish_with_no_observers_is_noop() {
        let notifier = Notifier::new();
        notifier.publish(&session(), UpdateType::Update);
    }

    #[test]
    fn test_observer_sees_session_and_update_type() {
        let seen: Rc<RefCell<Vec<(String, UpdateType)>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut notifier = Notifier::new();
        notifier.subscribe_fn(move |session: &Session, update: UpdateType| {
            sink.borrow_mut().push((session.id.clone(), update));
        });

        notifier.publish(&session(), UpdateType::Create);
        notifier.publish(&session(), UpdateType::Update);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("s-1".to_string(), UpdateType::Create));
        assert_eq!(seen[1], ("s-1".to_string(), UpdateType::Update));
    }

    #[test]
    fn test_update_type_wire_tags() {
        assert_eq!(serde_json::to_string(&UpdateType::Create).unwrap(), "\"CREATE\"");
        assert_eq!(serde_json::to_string(&UpdateType::Update).unwrap(), "\"UPDATE\"");
        let parsed: UpdateType = serde_json::from_str("\"UPDATE\"").unwrap();
        assert_eq!(parsed, UpdateType::Update);
    }
}
