use std::sync::Arc;

use salvo::async_trait;

use crate::error::AppResult;
use openmensa_core::error::CoreError;
use openmensa_db::store::Repository;

/// Injects the shared record store into every request.
pub struct StoreHandler {
    pub store: Arc<dyn Repository>,
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
        depot.inject(self.store.clone());
    }
}

/// ## Summary
/// Retrieves the record store from the depot.
///
/// ## Errors
/// Returns an error if the store is not found in the depot.
pub fn get_store_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn Repository>> {
    depot
        .obtain::<Arc<dyn Repository>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Record store not found in depot").into())
}
