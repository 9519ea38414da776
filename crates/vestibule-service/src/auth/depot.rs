//! Depot helpers for the authenticated principal and the credential validator.

use std::sync::Arc;

use super::validator::{CredentialValidator, StaffPrincipal};
use crate::error::{ServiceError, ServiceResult};

pub mod depot_keys {
    pub const AUTHENTICATED_PRINCIPAL: &str = "__authenticated_principal";
}

/// Get the authenticated staff principal from the depot.
///
/// ## Errors
///
/// Returns `NotAuthenticated` if the request was not authenticated.
pub fn get_principal_from_depot(depot: &salvo::Depot) -> ServiceResult<&StaffPrincipal> {
    depot
        .get::<StaffPrincipal>(depot_keys::AUTHENTICATED_PRINCIPAL)
        .map_err(|_e| ServiceError::NotAuthenticated)
}

/// Stores the authenticated staff principal for downstream handlers.
pub fn set_principal_in_depot(depot: &mut salvo::Depot, principal: StaffPrincipal) {
    depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, principal);
}

/// ## Summary
/// Retrieves the credential validator from the depot.
///
/// ## Errors
/// Returns an error if no validator was injected.
pub fn get_validator_from_depot(
    depot: &salvo::Depot,
) -> ServiceResult<Arc<dyn CredentialValidator>> {
    depot
        .obtain::<Arc<dyn CredentialValidator>>()
        .cloned()
        .map_err(|_err| ServiceError::InvariantViolation("Credential validator not found in depot"))
}
