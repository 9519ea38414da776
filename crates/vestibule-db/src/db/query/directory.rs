//! Read-only lookups against departments, divisions and public users.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{departments, divisions, public_users};
use crate::model::directory::{Department, Division, PublicUser};

/// ## Summary
/// Finds a department by id.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_department(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> diesel::QueryResult<Option<Department>> {
    departments::table
        .filter(departments::id.eq(id))
        .select(Department::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds a division by id.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_division(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> diesel::QueryResult<Option<Division>> {
    divisions::table
        .filter(divisions::id.eq(id))
        .select(Division::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Finds a public user by id.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_public_user(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> diesel::QueryResult<Option<PublicUser>> {
    public_users::table
        .filter(public_users::id.eq(id))
        .select(PublicUser::as_select())
        .first(conn)
        .await
        .optional()
}
