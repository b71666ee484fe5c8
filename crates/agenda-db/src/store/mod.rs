use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreResult;
use crate::model::calendar::{Calendar, CalendarUpdate};
use crate::model::event::{Event, EventUpdate};
use crate::model::outcome::UpdateOutcome;

pub mod connection;
pub mod memory;
pub mod mongo;

/// CRUD surface over the calendars collection.
///
/// Identifiers cross this seam as opaque strings; a malformed identifier
/// behaves exactly like an absent record, never like an error.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn create(&self, name: &str) -> StoreResult<Calendar>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Calendar>>;

    /// All calendars in insertion order.
    async fn get_all(&self) -> StoreResult<Vec<Calendar>>;

    async fn update_by_id(&self, id: &str, update: CalendarUpdate) -> StoreResult<UpdateOutcome>;

    /// Silent no-op when nothing matches.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

/// CRUD surface over the events collection, every operation scoped by the
/// owning calendar's identifier.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(
        &self,
        calendar_id: &str,
        name: &str,
        date: DateTime<Utc>,
    ) -> StoreResult<Event>;

    /// The event is only returned when both the event id and the calendar
    /// scope match.
    async fn get_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<Option<Event>>;

    /// All events of the calendar in insertion order.
    async fn get_all(&self, calendar_id: &str) -> StoreResult<Vec<Event>>;

    /// Events whose date falls within `[from, to]`, inclusive on both ends.
    async fn get_for_dates(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>>;

    async fn update_by_id(
        &self,
        calendar_id: &str,
        event_id: &str,
        update: EventUpdate,
    ) -> StoreResult<UpdateOutcome>;

    /// Silent no-op when nothing matches within the calendar scope.
    async fn delete_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<()>;
}
