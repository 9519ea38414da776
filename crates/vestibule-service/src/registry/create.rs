//! Registry entry creation.

use diesel_async::scoped_futures::ScopedFutureExt;
use serde::Serialize;

use vestibule_db::db::connection::DbConnection;
use vestibule_db::db::query::{directory, registry, session};
use vestibule_db::db::transaction::with_transaction;
use vestibule_db::model::registry::NewRegistryEntry;

use super::sequence::reserve_registry_id;
use super::validate::ValidatedEntry;
use crate::auth::StaffPrincipal;
use crate::error::{ServiceError, ServiceResult};

/// Identifiers of a freshly created entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEntry {
    pub id: i64,
    pub registry_id: String,
}

/// ## Summary
/// Checks that the department, division, public user and recording staff
/// account referenced by an entry exist and fit together.
///
/// ## Errors
/// Returns `ValidationError` naming the first reference that does not resolve.
async fn resolve_references(
    conn: &mut DbConnection<'_>,
    entry: &ValidatedEntry,
    created_by: Option<i64>,
) -> ServiceResult<()> {
    if directory::find_department(conn, entry.department_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::ValidationError(format!(
            "Department {} does not exist",
            entry.department_id
        )));
    }

    if let Some(division_id) = entry.division_id {
        match directory::find_division(conn, division_id).await? {
            None => {
                return Err(ServiceError::ValidationError(format!(
                    "Division {division_id} does not exist"
                )));
            }
            Some(division) if division.department_id != entry.department_id => {
                return Err(ServiceError::ValidationError(format!(
                    "Division {division_id} does not belong to department {}",
                    entry.department_id
                )));
            }
            Some(_) => {}
        }
    }

    if let Some(public_user_id) = entry.public_user_id
        && directory::find_public_user(conn, public_user_id)
            .await?
            .is_none()
    {
        return Err(ServiceError::ValidationError(format!(
            "Public user {public_user_id} does not exist"
        )));
    }

    if let Some(staff_id) = created_by
        && session::find_staff_user(conn, staff_id).await?.is_none()
    {
        return Err(ServiceError::ValidationError(format!(
            "Staff user {staff_id} does not exist"
        )));
    }

    Ok(())
}

/// ## Summary
/// Records a visit and assigns it the next registry id.
///
/// Reference checks, id reservation and the insert share one transaction, so
/// a failure at any step leaves neither a row nor a consumed id behind.
/// `created_by` falls back to the authenticated staff account.
///
/// ## Side Effects
/// - Advances the registry counter
/// - Inserts one `registry_entries` row with status `active`
///
/// ## Errors
/// Returns `ValidationError` for unresolvable references, and
/// `StoreUnavailable` or `TransactionError` when the store fails.
#[tracing::instrument(skip(conn, entry, principal), fields(department_id = entry.department_id))]
pub async fn create_registry_entry(
    conn: &mut DbConnection<'_>,
    entry: &ValidatedEntry,
    principal: Option<&StaffPrincipal>,
) -> ServiceResult<CreatedEntry> {
    let entry = entry.clone();
    let created_by = entry.created_by.or_else(|| principal.and_then(|p| p.id));

    let created = with_transaction(conn, move |tx| {
        async move {
            resolve_references(tx, &entry, created_by).await?;

            let registry_id = reserve_registry_id(tx).await?.to_string();

            let stored = registry::insert_entry(
                tx,
                &NewRegistryEntry {
                    registry_id: &registry_id,
                    public_user_id: entry.public_user_id,
                    visitor_name: &entry.visitor_name,
                    visitor_nic: &entry.visitor_nic,
                    visitor_address: entry.visitor_address.as_deref(),
                    visitor_phone: entry.visitor_phone.as_deref(),
                    department_id: entry.department_id,
                    division_id: entry.division_id,
                    purpose_of_visit: &entry.purpose_of_visit,
                    remarks: entry.remarks.as_deref(),
                    visitor_type: entry.visitor_type.into(),
                    status: vestibule_db::db::enums::EntryStatus::Active,
                    created_by,
                },
            )
            .await?;

            Ok::<_, ServiceError>(CreatedEntry {
                id: stored.id,
                registry_id: stored.registry_id,
            })
        }
        .scope_boxed()
    })
    .await?;

    tracing::info!(
        entry_id = created.id,
        registry_id = %created.registry_id,
        "Registry entry created"
    );

    Ok(created)
}
