//! Reference records maintained outside the registry: departments, divisions
//! and pre-registered public users.

use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::departments)]
#[diesel(check_for_backend(Pg))]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::departments)]
pub struct NewDepartment<'a> {
    pub name: &'a str,
}

#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations, Serialize,
)]
#[diesel(table_name = schema::divisions)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(Department, foreign_key = department_id))]
pub struct Division {
    pub id: i64,
    pub department_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::divisions)]
pub struct NewDivision<'a> {
    pub department_id: i64,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::public_users)]
#[diesel(check_for_backend(Pg))]
pub struct PublicUser {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub nic: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::public_users)]
pub struct NewPublicUser<'a> {
    pub public_id: &'a str,
    pub name: &'a str,
    pub nic: &'a str,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
}
