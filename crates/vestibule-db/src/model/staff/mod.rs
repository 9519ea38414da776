use diesel::{pg::Pg, prelude::*};

use crate::db::enums::StaffRole;
use crate::db::schema;

/// Staff or admin account able to record registry entries.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::staff_users)]
#[diesel(check_for_backend(Pg))]
pub struct StaffUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: StaffRole,
    pub department_id: Option<i64>,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::staff_users)]
pub struct NewStaffUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: StaffRole,
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::user_sessions)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(StaffUser, foreign_key = staff_user_id))]
pub struct UserSession {
    pub id: i64,
    pub staff_user_id: i64,
    pub token_hash: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::user_sessions)]
pub struct NewUserSession<'a> {
    pub staff_user_id: i64,
    pub token_hash: &'a str,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
