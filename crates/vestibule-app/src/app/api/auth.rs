use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use vestibule_core::config::AuthMethod;
use vestibule_core::constants::AUTH_ROUTE_COMPONENT;
use vestibule_service::auth::login::{LoginRequest, LoginResponse, login};

use super::envelope::{render_error, render_success};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

async fn perform_login(req: &mut Request, depot: &Depot) -> AppResult<LoginResponse> {
    let settings = get_config_from_depot(depot)?;
    if settings.auth.method != AuthMethod::Session {
        return Err(AppError::BadRequest(
            "Password login is disabled on this server".to_string(),
        ));
    }

    let request: LoginRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(login(&mut conn, &request, settings.auth.session_ttl_hours).await?)
}

/// ## Summary
/// POST /api/auth/login
///
/// Exchanges staff credentials for a bearer token.
///
/// ## Errors
/// Returns 400 for a malformed body, 401 for wrong credentials and 500 for
/// store failures.
#[handler]
#[tracing::instrument(skip_all)]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match perform_login(req, depot).await {
        Ok(session) => render_success(res, StatusCode::OK, "Login successful", session),
        Err(err) => render_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AUTH_ROUTE_COMPONENT).push(Router::with_path("login").post(login_handler))
}
