use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use vestibule_core::error::CoreError;
use vestibule_db::db::DbProvider;

/// Injects a shared connection provider into every request's depot.
pub struct DbProviderHandler {
    provider: Arc<dyn DbProvider>,
}

impl DbProviderHandler {
    #[must_use]
    pub fn new(provider: Arc<dyn DbProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl salvo::Handler for DbProviderHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.provider.clone());
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns an error if the database provider is not found in the depot.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn DbProvider>> {
    depot
        .obtain::<Arc<dyn DbProvider>>()
        .cloned()
        .map_err(|_err| {
            CoreError::InvariantViolation("Database provider not found in depot").into()
        })
}
