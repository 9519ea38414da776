//! Staff accounts and bearer sessions.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{staff_users, user_sessions};
use crate::model::staff::{NewUserSession, StaffUser, UserSession};

const ACTIVE: &str = "active";

/// ## Summary
/// Finds a staff account by id, whatever its status.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_staff_user(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> diesel::QueryResult<Option<StaffUser>> {
    staff_users::table
        .filter(staff_users::id.eq(id))
        .select(StaffUser::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds an active staff account by username.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_active_staff_by_username(
    conn: &mut DbConnection<'_>,
    username: &str,
) -> diesel::QueryResult<Option<StaffUser>> {
    staff_users::table
        .filter(staff_users::username.eq(username))
        .filter(staff_users::status.eq(ACTIVE))
        .select(StaffUser::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Resolves a token digest to the active staff account owning a live session.
///
/// A session is live when it is flagged valid and has not expired at `now`.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_staff_by_session(
    conn: &mut DbConnection<'_>,
    token_hash: &str,
    now: DateTime<Utc>,
) -> diesel::QueryResult<Option<StaffUser>> {
    user_sessions::table
        .inner_join(staff_users::table)
        .filter(user_sessions::token_hash.eq(token_hash))
        .filter(user_sessions::is_valid.eq(true))
        .filter(user_sessions::expires_at.gt(now))
        .filter(staff_users::status.eq(ACTIVE))
        .select(StaffUser::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Stores a new session.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_session(
    conn: &mut DbConnection<'_>,
    new_session: &NewUserSession<'_>,
) -> diesel::QueryResult<UserSession> {
    diesel::insert_into(user_sessions::table)
        .values(new_session)
        .returning(UserSession::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Marks a session invalid. Returns whether a live session was found.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn invalidate_session(
    conn: &mut DbConnection<'_>,
    token_hash: &str,
) -> diesel::QueryResult<bool> {
    let updated = diesel::update(
        user_sessions::table
            .filter(user_sessions::token_hash.eq(token_hash))
            .filter(user_sessions::is_valid.eq(true)),
    )
    .set(user_sessions::is_valid.eq(false))
    .execute(conn)
    .await?;

    Ok(updated > 0)
}
