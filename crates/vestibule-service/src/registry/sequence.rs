use vestibule_core::constants::REGISTRY_SEQUENCE_NAME;
use vestibule_core::types::RegistryId;
use vestibule_db::db::connection::DbConnection;
use vestibule_db::db::query::sequence;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Reserves the next registry id.
///
/// The reservation is only final once the caller's transaction commits; a
/// rollback hands the same id to the next creator.
///
/// ## Errors
/// Returns a store error if the counter cannot be advanced.
pub async fn reserve_registry_id(conn: &mut DbConnection<'_>) -> ServiceResult<RegistryId> {
    let value = sequence::next_registry_sequence(conn, REGISTRY_SEQUENCE_NAME).await?;
    registry_id_for(value)
}

/// ## Summary
/// Converts a raw counter value into a registry id.
///
/// ## Errors
/// Returns `InvariantViolation` for counter values below 1.
pub fn registry_id_for(value: i64) -> ServiceResult<RegistryId> {
    u64::try_from(value)
        .ok()
        .and_then(|value| RegistryId::from_sequence(value).ok())
        .ok_or(ServiceError::InvariantViolation(
            "registry counter returned a non-positive value",
        ))
}
