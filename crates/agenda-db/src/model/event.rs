//! Models for the events collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-generated identifier, opaque hex string on the wire.
    pub id: String,
    /// Lookup key of the owning calendar. Immutable after creation.
    pub calendar_id: String,
    pub name: String,
    /// RFC 3339 timestamp on the wire, BSON datetime at rest.
    pub date: DateTime<Utc>,
}

/// Typed partial update for an event.
///
/// There is deliberately no `calendar_id` field: events cannot move between
/// calendars.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl EventUpdate {
    /// True when no field is present, i.e. applying it would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.date.is_none()
    }
}
