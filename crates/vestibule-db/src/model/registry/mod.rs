use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::enums::{EntryStatus, VisitorType};
use crate::db::schema;

/// A stored registry entry. Visitor fields are a snapshot taken at entry time.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::registry_entries)]
#[diesel(check_for_backend(Pg))]
pub struct RegistryEntry {
    pub id: i64,
    pub registry_id: String,
    pub public_user_id: Option<i64>,
    pub visitor_name: String,
    pub visitor_nic: String,
    pub visitor_address: Option<String>,
    pub visitor_phone: Option<String>,
    pub department_id: i64,
    pub division_id: Option<i64>,
    pub purpose_of_visit: String,
    pub remarks: Option<String>,
    pub visitor_type: VisitorType,
    pub status: EntryStatus,
    pub entry_time: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<i64>,
}

/// Insert payload. `entry_time`, `updated_at` and `status` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::registry_entries)]
pub struct NewRegistryEntry<'a> {
    pub registry_id: &'a str,
    pub public_user_id: Option<i64>,
    pub visitor_name: &'a str,
    pub visitor_nic: &'a str,
    pub visitor_address: Option<&'a str>,
    pub visitor_phone: Option<&'a str>,
    pub department_id: i64,
    pub division_id: Option<i64>,
    pub purpose_of_visit: &'a str,
    pub remarks: Option<&'a str>,
    pub visitor_type: VisitorType,
    pub status: EntryStatus,
    pub created_by: Option<i64>,
}

/// Read-side projection: an entry plus display names joined at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntryView {
    #[serde(flatten)]
    pub entry: RegistryEntry,
    pub department_name: Option<String>,
    pub division_name: Option<String>,
    pub public_user_name: Option<String>,
    pub public_user_public_id: Option<String>,
}

impl
    From<(
        RegistryEntry,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
    )> for RegistryEntryView
{
    fn from(
        (entry, department_name, division_name, public_user_name, public_user_public_id): (
            RegistryEntry,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
        ),
    ) -> Self {
        Self {
            entry,
            department_name,
            division_name,
            public_user_name,
            public_user_public_id,
        }
    }
}
