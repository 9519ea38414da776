//! Forward-only status transitions: check-out and soft delete.

use diesel_async::scoped_futures::ScopedFutureExt;
use serde::Deserialize;

use vestibule_core::types::EntryStatus;
use vestibule_db::db::connection::DbConnection;
use vestibule_db::db::query::registry;
use vestibule_db::db::transaction::with_transaction;
use vestibule_db::model::registry::RegistryEntryView;

use super::query::get_registry_entry;
use crate::error::{ServiceError, ServiceResult};

/// Body of `PUT /registry/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    /// ## Summary
    /// Parses the requested target status.
    ///
    /// ## Errors
    /// Returns `ValidationError` unless the target is `checked_out` or `deleted`.
    pub fn target(&self) -> ServiceResult<EntryStatus> {
        match self.status.trim().parse::<EntryStatus>() {
            Ok(target @ (EntryStatus::CheckedOut | EntryStatus::Deleted)) => Ok(target),
            _ => Err(ServiceError::ValidationError(format!(
                "status must be 'checked_out' or 'deleted', got '{}'",
                self.status
            ))),
        }
    }
}

/// ## Summary
/// Moves an entry to `target` and returns the updated view.
///
/// The row is locked for the duration of the check so two concurrent
/// transitions cannot both succeed from the same starting state.
///
/// ## Side Effects
/// - Updates `status` and `updated_at`; visitor fields are untouched
///
/// ## Errors
/// Returns `NotFound` for an unknown id, `InvalidTransition` when the current
/// status cannot move to `target`, and store errors otherwise.
#[tracing::instrument(skip(conn))]
pub async fn update_registry_status(
    conn: &mut DbConnection<'_>,
    id: i64,
    target: EntryStatus,
) -> ServiceResult<RegistryEntryView> {
    let previous = with_transaction(conn, move |tx| {
        async move {
            let entry = registry::lock_entry(tx, id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Registry entry {id}")))?;

            let current = EntryStatus::from(entry.status);
            if !current.can_transition_to(target) {
                return Err(ServiceError::InvalidTransition {
                    from: current,
                    to: target,
                });
            }

            registry::set_status(tx, id, target.into()).await?;

            Ok(current)
        }
        .scope_boxed()
    })
    .await?;

    tracing::info!(entry_id = id, from = %previous, to = %target, "Registry entry status changed");

    get_registry_entry(conn, id).await
}
