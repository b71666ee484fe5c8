use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use agenda_core::error::CoreError;
use agenda_db::store::{CalendarStore, EventStore};

/// Store handles shared with every request.
///
/// Handlers never reach for a process-global connection; the adapters are
/// injected here so tests can swap in the in-memory store.
#[derive(Clone)]
pub struct Stores {
    pub calendars: Arc<dyn CalendarStore>,
    pub events: Arc<dyn EventStore>,
}

pub struct StoreHandler {
    pub stores: Stores,
}

#[async_trait]
impl salvo::Handler for StoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.stores.clone());
    }
}

/// ## Summary
/// Retrieves the store handles from the depot.
///
/// ## Errors
/// Returns an error if the store handles are not found in the depot.
pub fn get_stores_from_depot(depot: &salvo::Depot) -> AppResult<Stores> {
    depot.obtain::<Stores>().cloned().map_err(|_err| {
        CoreError::InvariantViolation("Store handles not found in depot").into()
    })
}
