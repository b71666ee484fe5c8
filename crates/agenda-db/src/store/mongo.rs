//! MongoDB-backed store adapter.
//!
//! Translates the store traits into document operations on the `calendars`
//! and `events` collections. Identifiers are ObjectIds; a string that does
//! not parse as one is treated as matching nothing.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::results::UpdateResult;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use agenda_core::error::CoreError;

use crate::error::StoreResult;
use crate::model::calendar::{Calendar, CalendarUpdate};
use crate::model::event::{Event, EventUpdate};
use crate::model::outcome::UpdateOutcome;
use crate::store::{CalendarStore, EventStore};

const CALENDARS_COLLECTION: &str = "calendars";
const EVENTS_COLLECTION: &str = "events";

/// Production store adapter over a MongoDB database handle.
#[derive(Clone)]
pub struct MongoStore {
    calendars: Collection<CalendarDocument>,
    events: Collection<EventDocument>,
}

impl MongoStore {
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            calendars: db.collection(CALENDARS_COLLECTION),
            events: db.collection(EVENTS_COLLECTION),
        }
    }
}

/// Wire form of a calendar document.
#[derive(Debug, Serialize, Deserialize)]
struct CalendarDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
}

/// Wire form of an event document.
#[derive(Debug, Serialize, Deserialize)]
struct EventDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(rename = "calendarId")]
    calendar_id: ObjectId,
    name: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    date: DateTime<Utc>,
}

impl From<CalendarDocument> for Calendar {
    fn from(doc: CalendarDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
        }
    }
}

impl From<EventDocument> for Event {
    fn from(doc: EventDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            calendar_id: doc.calendar_id.to_hex(),
            name: doc.name,
            date: doc.date,
        }
    }
}

fn parse_oid(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Parses an id that must be well-formed for the operation to make sense,
/// e.g. the owning calendar of a new event.
fn require_oid(id: &str) -> StoreResult<ObjectId> {
    parse_oid(id)
        .ok_or_else(|| CoreError::ValidationError(format!("malformed identifier: {id}")).into())
}

fn outcome_of(result: &UpdateResult) -> UpdateOutcome {
    UpdateOutcome {
        matched_count: result.matched_count,
        modified_count: result.modified_count,
    }
}

#[async_trait]
impl CalendarStore for MongoStore {
    async fn create(&self, name: &str) -> StoreResult<Calendar> {
        let document = CalendarDocument {
            id: ObjectId::new(),
            name: name.to_owned(),
        };
        self.calendars.insert_one(&document).await?;

        tracing::debug!(calendar_id = %document.id, "Calendar document inserted");

        Ok(document.into())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Calendar>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };

        let found = self.calendars.find_one(doc! { "_id": oid }).await?;
        Ok(found.map(Calendar::from))
    }

    async fn get_all(&self) -> StoreResult<Vec<Calendar>> {
        let cursor = self.calendars.find(doc! {}).await?;
        let documents: Vec<CalendarDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Calendar::from).collect())
    }

    async fn update_by_id(
        &self,
        id: &str,
        update: CalendarUpdate,
    ) -> StoreResult<UpdateOutcome> {
        let Some(oid) = parse_oid(id) else {
            return Ok(UpdateOutcome::none());
        };

        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }

        let result = self
            .calendars
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;

        Ok(outcome_of(&result))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let Some(oid) = parse_oid(id) else {
            return Ok(());
        };

        self.calendars.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for MongoStore {
    async fn create(
        &self,
        calendar_id: &str,
        name: &str,
        date: DateTime<Utc>,
    ) -> StoreResult<Event> {
        let document = EventDocument {
            id: ObjectId::new(),
            calendar_id: require_oid(calendar_id)?,
            name: name.to_owned(),
            date,
        };
        self.events.insert_one(&document).await?;

        tracing::debug!(event_id = %document.id, calendar_id, "Event document inserted");

        Ok(document.into())
    }

    async fn get_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<Option<Event>> {
        let (Some(cal_oid), Some(event_oid)) = (parse_oid(calendar_id), parse_oid(event_id))
        else {
            return Ok(None);
        };

        let found = self
            .events
            .find_one(doc! { "calendarId": cal_oid, "_id": event_oid })
            .await?;
        Ok(found.map(Event::from))
    }

    async fn get_all(&self, calendar_id: &str) -> StoreResult<Vec<Event>> {
        let Some(cal_oid) = parse_oid(calendar_id) else {
            return Ok(Vec::new());
        };

        let cursor = self.events.find(doc! { "calendarId": cal_oid }).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }

    async fn get_for_dates(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Event>> {
        let Some(cal_oid) = parse_oid(calendar_id) else {
            return Ok(Vec::new());
        };

        let filter = doc! {
            "calendarId": cal_oid,
            "date": {
                "$gte": bson::DateTime::from_chrono(from),
                "$lte": bson::DateTime::from_chrono(to),
            },
        };

        let cursor = self.events.find(filter).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }

    async fn update_by_id(
        &self,
        calendar_id: &str,
        event_id: &str,
        update: EventUpdate,
    ) -> StoreResult<UpdateOutcome> {
        let (Some(cal_oid), Some(event_oid)) = (parse_oid(calendar_id), parse_oid(event_id))
        else {
            return Ok(UpdateOutcome::none());
        };

        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(date) = update.date {
            set.insert("date", bson::DateTime::from_chrono(date));
        }

        let result = self
            .events
            .update_one(
                doc! { "calendarId": cal_oid, "_id": event_oid },
                doc! { "$set": set },
            )
            .await?;

        Ok(outcome_of(&result))
    }

    async fn delete_by_id(&self, calendar_id: &str, event_id: &str) -> StoreResult<()> {
        let (Some(cal_oid), Some(event_oid)) = (parse_oid(calendar_id), parse_oid(event_id))
        else {
            return Ok(());
        };

        self.events
            .delete_one(doc! { "calendarId": cal_oid, "_id": event_oid })
            .await?;
        Ok(())
    }
}
