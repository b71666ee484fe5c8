//! HTTP handlers for the calendars resource.

use salvo::http::StatusCode;
use salvo::writing::{Json, Text};
use salvo::{Depot, Request, Response, Router, handler};
use serde::Deserialize;
use tracing::error;

use agenda_db::model::calendar::CalendarUpdate;

use super::{events, stores_or_error};

/// Create calendar request payload.
#[derive(Debug, Default, Deserialize)]
struct CreateCalendarRequest {
    name: Option<String>,
}

/// ## Summary
/// POST /calendars - creates a calendar from the JSON in the request body.
///
/// ## Errors
/// Returns HTTP 400 if the body has no non-empty `name`
/// Returns HTTP 500 if the store call fails
#[handler]
async fn create_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body: CreateCalendarRequest = req.parse_json().await.unwrap_or_default();

    let name = match body.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(r#"body parameter "name" is required"#));
            return;
        }
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.calendars.create(&name).await {
        Ok(calendar) => {
            tracing::info!(calendar_id = %calendar.id, "Calendar created");
            res.render(Json(calendar));
        }
        Err(e) => {
            error!(error = ?e, "Failed to create calendar");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// GET /calendars/{id} - returns the calendar with the provided id.
///
/// ## Errors
/// Returns HTTP 404 if no calendar matches, including malformed ids
/// Returns HTTP 500 if the store call fails
#[handler]
async fn get_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = req.param::<String>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.calendars.get_by_id(&id).await {
        Ok(Some(calendar)) => res.render(Json(calendar)),
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            error!(error = ?e, calendar_id = %id, "Failed to look up calendar");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// GET /calendars - returns an array of all calendars.
#[handler]
async fn list_calendars(depot: &mut Depot, res: &mut Response) {
    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.calendars.get_all().await {
        Ok(calendars) => res.render(Json(calendars)),
        Err(e) => {
            error!(error = ?e, "Failed to list calendars");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// PUT /calendars/{id} - updates the calendar with the data in the request
/// body, reporting how many documents matched and changed.
///
/// ## Errors
/// Returns HTTP 400 if the body is absent or carries no known field
/// Returns HTTP 500 if the store call fails
#[handler]
async fn update_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = req.param::<String>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let update: CalendarUpdate = req.parse_json().await.unwrap_or_default();
    if update.is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Text::Plain("calendar is required"));
        return;
    }

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.calendars.update_by_id(&id, update).await {
        Ok(outcome) => res.render(Json(outcome)),
        Err(e) => {
            error!(error = ?e, calendar_id = %id, "Failed to update calendar");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

/// ## Summary
/// DELETE /calendars/{id} - deletes the calendar with the provided id.
/// Deleting an absent calendar is a successful no-op. Child events are not
/// cascaded.
///
/// ## Errors
/// Returns HTTP 500 with the failure's message if the store call fails
#[handler]
async fn delete_calendar(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = req.param::<String>("id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        return;
    };

    let Some(stores) = stores_or_error(depot, res) else {
        return;
    };

    match stores.calendars.delete_by_id(&id).await {
        Ok(()) => {
            tracing::info!(calendar_id = %id, "Calendar deleted");
            res.status_code(StatusCode::OK);
        }
        Err(e) => {
            error!(error = ?e, calendar_id = %id, "Failed to delete calendar");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain(e.to_string()));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("calendars")
        .get(list_calendars)
        .post(create_calendar)
        .push(events::routes())
        .push(
            Router::with_path("{id}")
                .get(get_calendar)
                .put(update_calendar)
                .delete(delete_calendar),
        )
}
