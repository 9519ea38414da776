//! Database enum types with Diesel serialization.
//!
//! This module provides type-safe enum wrappers for database CHECK constraints.
//! Each enum implements `ToSql` and `FromSql` for automatic conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// Visitor classification at entry time.
///
/// Maps to `registry_entries.visitor_type` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum VisitorType {
    #[default]
    New,
    Existing,
}

impl ToSql<Text, Pg> for VisitorType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for VisitorType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"new" => Ok(Self::New),
            b"existing" => Ok(Self::Existing),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl VisitorType {
    /// Returns the database string representation of this visitor type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Existing => "existing",
        }
    }
}

impl From<VisitorType> for vestibule_core::types::VisitorType {
    fn from(db_type: VisitorType) -> Self {
        match db_type {
            VisitorType::New => Self::New,
            VisitorType::Existing => Self::Existing,
        }
    }
}

impl From<vestibule_core::types::VisitorType> for VisitorType {
    fn from(core_type: vestibule_core::types::VisitorType) -> Self {
        match core_type {
            vestibule_core::types::VisitorType::New => Self::New,
            vestibule_core::types::VisitorType::Existing => Self::Existing,
        }
    }
}

impl fmt::Display for VisitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry entry lifecycle state.
///
/// Maps to `registry_entries.status` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Active,
    CheckedOut,
    Deleted,
}

impl ToSql<Text, Pg> for EntryStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for EntryStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"active" => Ok(Self::Active),
            b"checked_out" => Ok(Self::CheckedOut),
            b"deleted" => Ok(Self::Deleted),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl EntryStatus {
    /// Returns the database string representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CheckedOut => "checked_out",
            Self::Deleted => "deleted",
        }
    }
}

impl From<EntryStatus> for vestibule_core::types::EntryStatus {
    fn from(db_status: EntryStatus) -> Self {
        match db_status {
            EntryStatus::Active => Self::Active,
            EntryStatus::CheckedOut => Self::CheckedOut,
            EntryStatus::Deleted => Self::Deleted,
        }
    }
}

impl From<vestibule_core::types::EntryStatus> for EntryStatus {
    fn from(core_status: vestibule_core::types::EntryStatus) -> Self {
        match core_status {
            vestibule_core::types::EntryStatus::Active => Self::Active,
            vestibule_core::types::EntryStatus::CheckedOut => Self::CheckedOut,
            vestibule_core::types::EntryStatus::Deleted => Self::Deleted,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff account role.
///
/// Maps to `staff_users.role` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Staff,
}

impl ToSql<Text, Pg> for StaffRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for StaffRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"admin" => Ok(Self::Admin),
            b"staff" => Ok(Self::Staff),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl StaffRole {
    /// Returns the database string representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = vestibule_core::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            other => Err(vestibule_core::error::CoreError::InvalidInput(format!(
                "unknown staff role: {other}"
            ))),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
