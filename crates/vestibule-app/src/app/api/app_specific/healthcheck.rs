use salvo::http::StatusCode;
use salvo::{Depot, Response, Router, handler};

use crate::db_handler::get_db_from_depot;

/// Reports `OK` when a pooled connection can be checked out.
#[handler]
async fn healthcheck(depot: &mut Depot, res: &mut Response) {
    let healthy = match get_db_from_depot(depot) {
        Ok(provider) => provider.get_connection().await.is_ok(),
        Err(_) => false,
    };

    if healthy {
        res.render("OK");
    } else {
        tracing::warn!("Healthcheck failed: store unavailable");
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        res.render("Store unavailable");
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("healthcheck").get(healthcheck)
}
