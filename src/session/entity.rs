//! The session model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current version of the serialized session record.
///
/// Records without a `schemaVersion` field predate versioning and read
/// as version 1. Records from a newer version fail to parse, which the
/// controller treats as "no session" rather than risking a misread.
pub const RECORD_VERSION: u32 = 1;

fn default_record_version() -> u32 {
    RECORD_VERSION
}

/// One tracked usage episode.
///
/// The serialized field names are a compatibility contract with
/// previously stored records and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,

    /// Grace period in milliseconds the session may stay suspended
    /// before expiring; fixed at creation.
    #[serde(rename = "backgroundTimeout", default)]
    pub suspension_timeout: i64,

    /// Epoch milliseconds of the last active confirmation (creation or
    /// resume). Deliberately not updated on suspend: the grace period
    /// counts from the last time the session was confirmed active.
    #[serde(rename = "updatedTimestamp", default)]
    pub updated_at: i64,

    /// True while the application is backgrounded and the session has
    /// not yet expired or been resumed.
    #[serde(rename = "isSuspended", default)]
    pub suspended: bool,

    /// True while the session is usable. Becomes false exactly once;
    /// an invalid session is replaced, never resurrected.
    #[serde(rename = "isValid", default)]
    pub valid: bool,

    #[serde(rename = "schemaVersion", default = "default_record_version")]
    pub schema_version: u32,
}

impl Session {
    /// A freshly created, valid, non-suspended session.
    pub fn new(id: String, suspension_timeout: i64, now_ms: i64) -> Self {
        Self {
            id,
            suspension_timeout,
            updated_at: now_ms,
            suspended: false,
            valid: true,
            schema_version: RECORD_VERSION,
        }
    }

    /// Serialize to the canonical textual record.
    pub fn to_record(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a record produced by [`Session::to_record`] (or by an older
    /// writer of the same format).
    ///
    /// Fails on malformed input, on a missing `id`, and on a record
    /// version newer than [`RECORD_VERSION`]. Any other missing field
    /// takes its zero value, so a degraded record always comes back with
    /// `valid == false` and gets replaced instead of resurrected.
    pub fn from_record(input: &str) -> Result<Self> {
        let session: Session = serde_json::from_str(input)?;
        if session.schema_version > RECORD_VERSION {
            return Err(Error::UnsupportedRecordVersion(session.schema_version));
        }
        Ok(session)
    }

    /// Epoch milliseconds after which a suspended session can no longer
    /// be resumed.
    pub fn expiry_deadline(&self) -> i64 {
        self.updated_at.saturating_add(self.suspension_timeout)
    }

    /// Whether the grace period has elapsed at `now_ms`. Only meaningful
    /// while the session is suspended.
    pub fn expired_at(&self, now_ms: i64) -> bool {
        self.expiry_deadline() <= now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let mut session = Session::new("abc-123".to_string(), 60_000, 1_700_000_000_000);
        session.suspended = true;
        let record = session.to_record().unwrap();
        assert_eq!(Session::from_record(&record).unwrap(), session);
    }

    #[test]
    fn test_record_field_names_are_stable() {
        let session = Session::new("abc-123".to_string(), 60_000, 42);
        let record = session.to_record().unwrap();
        let value: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(value["id"], "abc-123");
        assert_eq!(value["backgroundTimeout"], 60_000);
        assert_eq!(value["updatedTimestamp"], 42);
        assert_eq!(value["isSuspended"], false);
        assert_eq!(value["isValid"], true);
        assert_eq!(value["schemaVersion"], 1);
    }

    #[test]
    fn test_parse_unversioned_record() {
        // Records written before versioning carry only the five fields.
        let record = r#"{"id":"abc","backgroundTimeout":60000,"updatedTimestamp":123,"isSuspended":true,"isValid":true}"#;
        let session = Session::from_record(record).unwrap();
        assert_eq!(session.id, "abc");
        assert_eq!(session.suspension_timeout, 60_000);
        assert_eq!(session.updated_at, 123);
        assert!(session.suspended);
        assert!(session.valid);
        assert_eq!(session.schema_version, 1);
    }

    #[test]
    fn test_parse_fails_without_id() {
        let record = r#"{"backgroundTimeout":60000,"isValid":true}"#;
        assert!(Session::from_record(record).is_err());
    }

    #[test]
    fn test_parse_fails_on_malformed_input() {
        assert!(Session::from_record("not json").is_err());
        assert!(Session::from_record("{\"id\":").is_err());
    }

    #[test]
    fn test_parse_rejects_newer_record_version() {
        let record = r#"{"id":"abc","schemaVersion":2}"#;
        match Session::from_record(record) {
            Err(Error::UnsupportedRecordVersion(2)) => {}
            other => panic!("expected UnsupportedRecordVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_leave_record_invalid() {
        let session = Session::from_record(r#"{"id":"half"}"#).unwrap();
        assert_eq!(session.id, "half");
        assert_eq!(session.suspension_timeout, 0);
        assert_eq!(session.updated_at, 0);
        assert!(!session.suspended);
        assert!(!session.valid);
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let mut session = Session::new("abc".to_string(), 1000, 200);
        session.suspended = true;
        assert!(!session.expired_at(1199));
        assert!(session.expired_at(1200));
        assert!(session.expired_at(1201));
    }
}
