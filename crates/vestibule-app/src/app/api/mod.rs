mod app_specific;
mod auth;
pub mod envelope;
mod registry;

use salvo::Router;

pub use vestibule_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, AUTH_ROUTE_COMPONENT, AUTH_ROUTE_PREFIX,
    REGISTRY_ROUTE_COMPONENT, REGISTRY_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: registry, staff login and healthcheck.
///
/// Expects `DbProviderHandler`, `ConfigHandler` and
/// `CredentialValidatorHandler` to be hooped on an enclosing router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(auth::routes())
        .push(registry::routes())
}
