//! Models for the calendars collection.

use serde::{Deserialize, Serialize};

/// A stored calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    /// Store-generated identifier, opaque hex string on the wire.
    pub id: String,
    pub name: String,
}

/// Typed partial update for a calendar.
///
/// Fields absent from the request body stay `None` and are left untouched by
/// the store. The identifier is not part of the update surface.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUpdate {
    pub name: Option<String>,
}

impl CalendarUpdate {
    /// True when no field is present, i.e. applying it would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
