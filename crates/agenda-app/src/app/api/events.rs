//! HTTP handlers for the events resource, nested under a calendar.
//!
//! The owning calendar's id arrives through the `{calendar_id}` path
//! parameter of the enclosing router; every store call is scoped by it.

use salvo::http::StatusCode;
use salvo::writing::{Json, Text};
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use tracing::error;

use agenda_core::util::date::parse_date;
use agenda_db::model::event::EventUpdate;

use super::stores_or_error;

/// Create event request payload. The date arrives as an ISO string.
#[derive(Debug, Default, Deserialize)]
struct CreateEventRequest {
    name: Option<String>,
    date: Option<String>,
}

/// Update event request payload; fields absent from the body stay unchanged.
/// The owning calendar is not part of the update surface.
#[derive(Debug, Default, Deserialize)]
struct UpdateEventRequest {
    name: Option<String>,
    date: Option<String>,
}

/// ## Summary
/// POST /calendars/{calendar_id}/events - creates an event for the calendar
/// from the JSON in the request body.
///
/// ## Errors
/// Returns HTTP 400 naming the missing field; `name` is checked before `date`
/// Returns HTTP 400 if `date` does not parse as a date
/// Returns HTTP 500 if the store call fails
#[handler]
async fn create_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(calendar_id) = req.param::<String>("calendar_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let body: CreateEventRequest = req.parse_json().await.unwrap_or_default();

    let name = match body.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(r#"body parameter "name" is required"#));
            return;
        }
    };
    let raw_date = match body.date {
        Some(date) if !date.is_empty() => date,
        _ => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(r#"body parameter "date" is required"#));
            return;
        }
    };
    let date = match parse_date(&raw_date) {
        Ok(date) => date,
        Err(e) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(format!(
                r#"body parameter "date" must be a valid date: {e}"#
            )));
            return;
        }
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.events.create(&calendar_id, &name, date).await {
        Ok(event) => {
            tracing::info!(event_id = %event.id, calendar_id = %calendar_id, "Event created");
            res.render(Json(event));
        }
        Err(e) => {
            error!(error = ?e, calendar_id = %calendar_id, "Failed to create event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// GET /calendars/{calendar_id}/events/{event_id} - returns the event with
/// the provided id from the specified calendar.
///
/// ## Errors
/// Returns HTTP 404 if no event matches within the calendar scope, including
/// malformed ids and ids that exist under a different calendar
/// Returns HTTP 500 if the store call fails
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let (Some(calendar_id), Some(event_id)) = (
        req.param::<String>("calendar_id"),
        req.param::<String>("event_id"),
    ) else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.events.get_by_id(&calendar_id, &event_id).await {
        Ok(Some(event)) => res.render(Json(event)),
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Text::Plain("event not found"));
        }
        Err(e) => {
            error!(error = ?e, calendar_id = %calendar_id, event_id = %event_id, "Failed to look up event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// GET /calendars/{calendar_id}/events - returns an array of the calendar's
/// events. With both `from` and `to` query parameters present, only events
/// dated within `[from, to]` (inclusive) are returned.
///
/// ## Errors
/// Returns HTTP 400 if a provided date bound does not parse
/// Returns HTTP 500 if the store call fails
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(calendar_id) = req.param::<String>("calendar_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    let result = if let (Some(from), Some(to)) =
        (req.query::<String>("from"), req.query::<String>("to"))
    {
        let (from, to) = match (parse_date(&from), parse_date(&to)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Text::Plain(format!(
                    r#"query parameters "from" and "to" must be valid dates: {e}"#
                )));
                return;
            }
        };
        stores.events.get_for_dates(&calendar_id, from, to).await
    } else {
        stores.events.get_all(&calendar_id).await
    };

    match result {
        Ok(events) => res.render(Json(events)),
        Err(e) => {
            error!(error = ?e, calendar_id = %calendar_id, "Failed to list events");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// PUT /calendars/{calendar_id}/events/{event_id} - updates the event with
/// the data in the request body, reporting how many documents matched and
/// changed.
///
/// ## Errors
/// Returns HTTP 400 if the body is absent or carries no known field
/// Returns HTTP 400 if a provided `date` does not parse
/// Returns HTTP 500 if the store call fails
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let (Some(calendar_id), Some(event_id)) = (
        req.param::<String>("calendar_id"),
        req.param::<String>("event_id"),
    ) else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let body: UpdateEventRequest = req.parse_json().await.unwrap_or_default();
    if body.name.is_none() && body.date.is_none() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Text::Plain("event is required"));
        return;
    }

    let date = match body.date {
        Some(raw) => match parse_date(&raw) {
            Ok(date) => Some(date),
            Err(e) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Text::Plain(format!(
                    r#"body parameter "date" must be a valid date: {e}"#
                )));
                return;
            }
        },
        None => None,
    };
    let update = EventUpdate {
        name: body.name,
        date,
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.events.update_by_id(&calendar_id, &event_id, update).await {
        Ok(outcome) => res.render(Json(outcome)),
        Err(e) => {
            error!(error = ?e, calendar_id = %calendar_id, event_id = %event_id, "Failed to update event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// DELETE /calendars/{calendar_id}/events/{event_id} - deletes the event
/// with the provided id from the specified calendar. Deleting an absent
/// event is a successful no-op.
///
/// ## Errors
/// Returns HTTP 500 with the failure's message if the store call fails
#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let (Some(calendar_id), Some(event_id)) = (
        req.param::<String>("calendar_id"),
        req.param::<String>("event_id"),
    ) else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.events.delete_by_id(&calendar_id, &event_id).await {
        Ok(()) => {
            tracing::info!(event_id = %event_id, calendar_id = %calendar_id, "Event deleted");
            res.status_code(StatusCode::OK);
        }
        Err(e) => {
            error!(error = ?e, calendar_id = %calendar_id, event_id = %event_id, "Failed to delete event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("{calendar_id}/events")
        .get(list_events)
        .post(create_event)
        .push(
            Router::with_path("{event_id}")
                .get(get_event)
                .put(update_event)
                .delete(delete_event),
        )
}
