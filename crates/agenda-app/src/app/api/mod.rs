mod calendars;
mod events;
mod healthcheck;

use salvo::http::StatusCode;
use salvo::writing::Text;
use salvo::{Depot, Response, Router};

use crate::store_handler::{Stores, get_stores_from_depot};

/// ## Summary
/// Constructs the service router.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(calendars::routes())
}

/// Pulls the store handles out of the depot, rendering a 500 when they were
/// never injected.
pub(crate) fn stores_or_error(depot: &Depot, res: &mut Response) -> Option<Stores> {
    match get_stores_from_depot(depot) {
        Ok(stores) => Some(stores),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to get store handles");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Text::Plain("internal server error"));
            None
        }
    }
}
