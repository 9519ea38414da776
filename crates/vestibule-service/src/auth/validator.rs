//! Bearer credential validation.
//!
//! Write requests carry `Authorization: Bearer <token>`. The gate asks a
//! [`CredentialValidator`] to resolve the token to a [`StaffPrincipal`]; the
//! implementation is picked from `auth.method` at startup and injected into
//! the depot by [`CredentialValidatorHandler`].

use std::sync::Arc;

use salvo::async_trait;
use serde::Serialize;

use vestibule_core::config::{AuthMethod, Settings};
use vestibule_db::db::DbProvider;
use vestibule_db::db::enums::StaffRole;
use vestibule_db::db::query::session;

use super::token::hash_token;
use crate::error::{ServiceError, ServiceResult};

/// The staff identity behind an accepted bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffPrincipal {
    /// Staff account id. `None` for the configured static-token operator,
    /// which has no row in `staff_users`.
    pub id: Option<i64>,
    pub username: String,
    pub role: StaffRole,
}

/// Resolves bearer tokens to staff principals.
///
/// `Ok(None)` means the token was rejected. `Err` is reserved for failures of
/// the validator itself, such as an unreachable store.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(&self, token: &str) -> ServiceResult<Option<StaffPrincipal>>;
}

/// Looks tokens up in `user_sessions` by SHA-256 digest.
pub struct SessionTokenValidator {
    db: Arc<dyn DbProvider>,
}

impl SessionTokenValidator {
    #[must_use]
    pub fn new(db: Arc<dyn DbProvider>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialValidator for SessionTokenValidator {
    #[tracing::instrument(skip_all)]
    async fn validate(&self, token: &str) -> ServiceResult<Option<StaffPrincipal>> {
        let token_hash = hash_token(token);
        let mut conn = self.db.get_connection().await?;

        let staff =
            session::find_staff_by_session(&mut conn, &token_hash, chrono::Utc::now()).await?;

        Ok(staff.map(|staff| StaffPrincipal {
            id: Some(staff.id),
            username: staff.username,
            role: staff.role,
        }))
    }
}

/// Accepts exactly one configured token.
pub struct StaticTokenValidator {
    token_hash: String,
    principal: StaffPrincipal,
}

impl StaticTokenValidator {
    #[must_use]
    pub fn new(token: &str, principal: StaffPrincipal) -> Self {
        Self {
            token_hash: hash_token(token),
            principal,
        }
    }
}

#[async_trait]
impl CredentialValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> ServiceResult<Option<StaffPrincipal>> {
        // Digests are compared so the comparison time does not depend on
        // how much of the secret matched.
        let accepted = hash_token(token) == self.token_hash;
        Ok(accepted.then(|| self.principal.clone()))
    }
}

/// ## Summary
/// Builds the validator selected by `auth.method`.
///
/// ## Errors
/// Returns `InvalidConfiguration` if `static_token` is selected without a
/// token section, with an empty token or with an unknown role.
pub fn build_validator(
    settings: &Settings,
    db: Arc<dyn DbProvider>,
) -> ServiceResult<Arc<dyn CredentialValidator>> {
    match settings.auth.method {
        AuthMethod::Session => Ok(Arc::new(SessionTokenValidator::new(db))),
        AuthMethod::StaticToken => {
            let config = settings.auth.static_token.as_ref().ok_or_else(|| {
                ServiceError::InvalidConfiguration(
                    "auth.static_token is required for static_token auth".to_string(),
                )
            })?;

            if config.token.trim().is_empty() {
                return Err(ServiceError::InvalidConfiguration(
                    "auth.static_token.token must not be empty".to_string(),
                ));
            }

            let role = config.role.parse::<StaffRole>().map_err(|e| {
                ServiceError::InvalidConfiguration(format!("auth.static_token.role: {e}"))
            })?;

            tracing::warn!(
                username = %config.username,
                "Static token authentication enabled; every write is attributed to one operator"
            );

            Ok(Arc::new(StaticTokenValidator::new(
                config.token.trim(),
                StaffPrincipal {
                    id: None,
                    username: config.username.clone(),
                    role,
                },
            )))
        }
    }
}

/// Injects the configured validator into the depot.
pub struct CredentialValidatorHandler {
    pub validator: Arc<dyn CredentialValidator>,
}

#[async_trait]
impl salvo::Handler for CredentialValidatorHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.validator.clone());
    }
}
