//! Staff login: trades a username and password for a session token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use vestibule_db::db::connection::DbConnection;
use vestibule_db::db::enums::StaffRole;
use vestibule_db::db::query::session;
use vestibule_db::model::staff::NewUserSession;

use super::password::verify_password;
use super::token::{generate_token, hash_token};
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: StaffRole,
}

/// Returned once per login. The token itself is never stored.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: LoginUser,
}

/// ## Summary
/// Verifies staff credentials and opens a session valid for `ttl_hours`.
///
/// ## Side Effects
/// - Inserts a `user_sessions` row holding the token digest
///
/// ## Errors
/// Returns `ValidationError` for blank credentials, `NotAuthenticated` for an
/// unknown or inactive user or a wrong password, and store errors otherwise.
#[tracing::instrument(skip(conn, request), fields(username = %request.username))]
pub async fn login(
    conn: &mut DbConnection<'_>,
    request: &LoginRequest,
    ttl_hours: u32,
) -> ServiceResult<LoginResponse> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ServiceError::ValidationError(
            "Username and password are required".to_string(),
        ));
    }

    let Some(staff) = session::find_active_staff_by_username(conn, username).await? else {
        tracing::debug!("Login for unknown or inactive user");
        return Err(ServiceError::NotAuthenticated);
    };

    verify_password(&request.password, &staff.password_hash)?;

    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::hours(i64::from(ttl_hours));

    let stored = session::insert_session(
        conn,
        &NewUserSession {
            staff_user_id: staff.id,
            token_hash: &token_hash,
            expires_at,
        },
    )
    .await?;

    tracing::info!(staff_user_id = staff.id, session_id = stored.id, "Staff login succeeded");

    Ok(LoginResponse {
        token,
        expires_at: stored.expires_at,
        user: LoginUser {
            id: staff.id,
            username: staff.username,
            name: staff.name,
            role: staff.role,
        },
    })
}
