//! In-memory store adapter.
//!
//! Drop-in replacement for the MongoDB adapter in tests. Records are kept in
//! insertion order; ids are ObjectId hex strings so malformed-id handling
//! matches the production adapter.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use agenda_core::error::CoreError;

use crate::error::StoreResult;
use crate::model::calendar::{Calendar, CalendarUpdate};
use crate::model::event::{Event, EventUpdate};
use crate::model::outcome::UpdateOutcome;
use crate::store::{CalendarStore, EventStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    calendars: Mutex<Vec<Calendar>>,
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Locks a record list and recovers from poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn well_formed(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn create(&self, name: &str) -> StoreResult<Calendar> {
        let calendar = Calendar {
            id: ObjectId::new().to_hex(),
            name: name.to_owned(),
        };
        lock(&self.calendars).push(calendar.clone());
        Ok(calendar)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Calendar>> {
        if !well_formed(id) {
            return Ok(None);
        }
        Ok(lock(&self.calendars).iter().find(|c| c.id == id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<Calendar>> {
        Ok(lock(&self.calendars).clone())
    }

    async fn update_by_id(
        &self,
        id: &str,
        update: CalendarUpdate,
    ) -> StoreResult<UpdateOutcome> {
        if !well_formed(id) {
            return Ok(UpdateOutcome::none());
        }

        let mut calendars = lock(&self.calendars);
        let Some(calendar) = calendars.iter_mut().find(|c| c.id == id) else {
            return Ok(UpdateOutcome::none());
        };

        let mut modified = 0;
        if let Some(name) = update.name
            && calendar.name != name
        {
            calendar.name = name;
            modified = 1;
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: modified,
        })
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        lock(&self.calendars).retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn create(
        &self,
        calendar_id: &str,
        name: &str,
        date: DateTime<Utc>,
    ) -> StoreResult<Event> {
        if !well_formed(calendar_id) {
            return Err(
                CoreError::ValidationError(format!("malformed identifier: {calendar_id}")).into(),
            );
        }

        let event = Event {
            id: ObjectId::new().to_hex(),
            calendar_id: calendar_id.to_owned(),
            name: name.to_owned(),
            date,
        };
        lock(&self.events).push(event.clone());
        Ok(event)
    }

    async fn get_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<Option<Event>> {
        if !well_formed(calendar_id) || !well_formed(event_id) {
            return Ok(None);
        }
        Ok(lock(&self.events)
            .iter()
            .find(|e| e.calendar_id == calendar_id && e.id == event_id)
            .cloned())
    }

    async fn get_all(&self, calendar_id: &str) -> StoreResult<Vec<Event>> {
        Ok(lock(&self.events)
            .iter()
            .filter(|e| e.calendar_id == calendar_id)
            .cloned()
            .collect())
    }

    async fn get_for_dates(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>> {
        Ok(lock(&self.events)
            .iter()
            .filter(|e| e.calendar_id == calendar_id && e.date >= from && e.date <= to)
            .cloned()
            .collect())
    }

    async fn update_by_id(
        &self,
        calendar_id: &str,
        event_id: &str,
        update: EventUpdate,
    ) -> StoreResult<UpdateOutcome> {
        if !well_formed(calendar_id) || !well_formed(event_id) {
            return Ok(UpdateOutcome::none());
        }

        let mut events = lock(&self.events);
        let Some(event) = events
            .iter_mut()
            .find(|e| e.calendar_id == calendar_id && e.id == event_id)
        else {
            return Ok(UpdateOutcome::none());
        };

        let mut modified = 0;
        if let Some(name) = update.name
            && event.name != name
        {
            event.name = name;
            modified = 1;
        }
        if let Some(date) = update.date
            && event.date != date
        {
            event.date = date;
            modified = 1;
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: modified,
        })
    }

    async fn delete_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<()> {
        lock(&self.events).retain(|e| !(e.calendar_id == calendar_id && e.id == event_id));
        Ok(())
    }
}
