//! `/api/registry` handlers.
//!
//! Reads are public. Writes sit behind [`AuthMiddleware`]; any verb without a
//! handler gets a 405 envelope from the router goals.

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use vestibule_core::constants::REGISTRY_ROUTE_COMPONENT;
use vestibule_core::types::EntryStatus;
use vestibule_db::model::registry::RegistryEntryView;
use vestibule_service::auth::get_principal_from_depot;
use vestibule_service::registry::{
    CreatedEntry, DailySummary, NewRegistryEntryRequest, RegistryFilter, StatusUpdateRequest,
    SummaryFilter, create_registry_entry, daily_summary, get_registry_entry,
    list_registry_entries, update_registry_status, validate_new_entry,
};

use super::envelope::{render_error, render_success};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthMiddleware;

fn entry_id(req: &Request) -> AppResult<i64> {
    req.param::<i64>("id")
        .ok_or_else(|| AppError::BadRequest("Registry entry id must be an integer".to_string()))
}

async fn load_entries(req: &mut Request, depot: &Depot) -> AppResult<Vec<RegistryEntryView>> {
    let filter: RegistryFilter = req
        .parse_queries()
        .map_err(|e| AppError::BadRequest(format!("Invalid query parameters: {e}")))?;

    let settings = get_config_from_depot(depot)?;
    let tz = settings.registry.office_timezone()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(list_registry_entries(&mut conn, &filter, &tz).await?)
}

/// ## Summary
/// GET /api/registry
///
/// Lists one day's entries, optionally narrowed by department, search term
/// and status.
#[handler]
#[tracing::instrument(skip_all)]
async fn list_entries(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match load_entries(req, depot).await {
        Ok(entries) => {
            let message = format!("Found {} registry entries", entries.len());
            render_success(res, StatusCode::OK, message, entries);
        }
        Err(err) => render_error(res, &err),
    }
}

async fn record_entry(req: &mut Request, depot: &Depot) -> AppResult<CreatedEntry> {
    let request: NewRegistryEntryRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    let entry = validate_new_entry(&request)?;
    let principal = get_principal_from_depot(depot).ok();

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(create_registry_entry(&mut conn, &entry, principal).await?)
}

/// ## Summary
/// POST /api/registry
///
/// Records a visit. Responds 201 with the new `id` and `registry_id`.
///
/// ## Errors
/// Returns 400 for malformed or incomplete bodies and unknown references,
/// and 500 when the store fails. Nothing is written on error.
#[handler]
#[tracing::instrument(skip_all)]
async fn create_entry(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match record_entry(req, depot).await {
        Ok(created) => render_success(
            res,
            StatusCode::CREATED,
            "Registry entry created successfully",
            created,
        ),
        Err(err) => render_error(res, &err),
    }
}

async fn load_entry(req: &Request, depot: &Depot) -> AppResult<RegistryEntryView> {
    let id = entry_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(get_registry_entry(&mut conn, id).await?)
}

/// GET /api/registry/{id}
#[handler]
#[tracing::instrument(skip_all)]
async fn show_entry(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match load_entry(req, depot).await {
        Ok(entry) => render_success(res, StatusCode::OK, "Registry entry found", entry),
        Err(err) => render_error(res, &err),
    }
}

async fn transition_entry(
    req: &mut Request,
    depot: &Depot,
    target: Option<EntryStatus>,
) -> AppResult<RegistryEntryView> {
    let id = entry_id(req)?;

    let target = match target {
        Some(target) => target,
        None => req
            .parse_json::<StatusUpdateRequest>()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
            .target()?,
    };

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(update_registry_status(&mut conn, id, target).await?)
}

/// ## Summary
/// PUT /api/registry/{id}
///
/// Body `{"status": "checked_out" | "deleted"}`.
///
/// ## Errors
/// Returns 404 for an unknown entry and 409 when the entry's current status
/// cannot move to the requested one.
#[handler]
#[tracing::instrument(skip_all)]
async fn update_entry(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match transition_entry(req, depot, None).await {
        Ok(entry) => render_success(res, StatusCode::OK, "Registry entry updated", entry),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// DELETE /api/registry/{id}
///
/// Soft delete: the row stays and its registry id is never reused.
#[handler]
#[tracing::instrument(skip_all)]
async fn delete_entry(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match transition_entry(req, depot, Some(EntryStatus::Deleted)).await {
        Ok(entry) => render_success(res, StatusCode::OK, "Registry entry deleted", entry),
        Err(err) => render_error(res, &err),
    }
}

async fn load_summary(req: &mut Request, depot: &Depot) -> AppResult<DailySummary> {
    let filter: SummaryFilter = req
        .parse_queries()
        .map_err(|e| AppError::BadRequest(format!("Invalid query parameters: {e}")))?;

    let settings = get_config_from_depot(depot)?;
    let tz = settings.registry.office_timezone()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(daily_summary(&mut conn, &filter, &tz).await?)
}

/// GET /api/registry/summary
#[handler]
#[tracing::instrument(skip_all)]
async fn show_summary(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match load_summary(req, depot).await {
        Ok(summary) => render_success(res, StatusCode::OK, "Registry summary", summary),
        Err(err) => render_error(res, &err),
    }
}

#[handler]
async fn method_not_allowed(req: &mut Request, res: &mut Response) {
    tracing::debug!(method = %req.method(), path = %req.uri().path(), "Method not allowed");
    render_error(res, &AppError::MethodNotAllowed);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(REGISTRY_ROUTE_COMPONENT)
        .get(list_entries)
        .push(Router::new().hoop(AuthMiddleware).post(create_entry))
        .push(
            Router::with_path("summary")
                .get(show_summary)
                .goal(method_not_allowed),
        )
        .push(
            Router::with_path("{id}")
                .get(show_entry)
                .push(
                    Router::new()
                        .hoop(AuthMiddleware)
                        .put(update_entry)
                        .delete(delete_entry),
                )
                .goal(method_not_allowed),
        )
        .goal(method_not_allowed)
}
