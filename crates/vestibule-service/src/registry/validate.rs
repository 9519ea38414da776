//! Validation of new registry entries.
//!
//! Everything here is pure so a bad request is rejected before a connection
//! is taken from the pool.

use serde::Deserialize;

use vestibule_core::types::VisitorType;

use crate::error::{ServiceError, ServiceResult};

/// Body of `POST /registry`. Every field is optional at the serde level so
/// missing and empty values produce the same validation message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRegistryEntryRequest {
    pub visitor_name: Option<String>,
    pub visitor_nic: Option<String>,
    pub visitor_address: Option<String>,
    pub visitor_phone: Option<String>,
    pub department_id: Option<i64>,
    pub division_id: Option<i64>,
    pub purpose_of_visit: Option<String>,
    pub remarks: Option<String>,
    pub public_user_id: Option<i64>,
    pub visitor_type: Option<String>,
    pub created_by: Option<i64>,
}

/// A request that passed validation. Strings are trimmed and blank optional
/// values are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub visitor_name: String,
    pub visitor_nic: String,
    pub visitor_address: Option<String>,
    pub visitor_phone: Option<String>,
    pub department_id: i64,
    pub division_id: Option<i64>,
    pub purpose_of_visit: String,
    pub remarks: Option<String>,
    pub public_user_id: Option<i64>,
    pub visitor_type: VisitorType,
    pub created_by: Option<i64>,
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn positive_id(field: &str, value: Option<i64>) -> ServiceResult<Option<i64>> {
    match value {
        Some(id) if id <= 0 => Err(ServiceError::ValidationError(format!(
            "{field} must be a positive id"
        ))),
        other => Ok(other),
    }
}

/// ## Summary
/// Checks mandatory fields and normalizes the rest.
///
/// ## Errors
/// Returns `ValidationError` naming every missing mandatory field, or
/// describing the first malformed optional field.
pub fn validate_new_entry(request: &NewRegistryEntryRequest) -> ServiceResult<ValidatedEntry> {
    let visitor_name = present(request.visitor_name.as_deref());
    let visitor_nic = present(request.visitor_nic.as_deref());
    let purpose_of_visit = present(request.purpose_of_visit.as_deref());
    let department_id = request.department_id.filter(|id| *id > 0);

    let mut missing = Vec::new();
    if visitor_name.is_none() {
        missing.push("visitor_name");
    }
    if visitor_nic.is_none() {
        missing.push("visitor_nic");
    }
    if department_id.is_none() {
        missing.push("department_id");
    }
    if purpose_of_visit.is_none() {
        missing.push("purpose_of_visit");
    }

    let (
        Some(visitor_name),
        Some(visitor_nic),
        Some(department_id),
        Some(purpose_of_visit),
    ) = (visitor_name, visitor_nic, department_id, purpose_of_visit)
    else {
        return Err(ServiceError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    };

    let visitor_type = match present(request.visitor_type.as_deref()) {
        Some(raw) => raw.parse::<VisitorType>()?,
        None => VisitorType::default(),
    };

    Ok(ValidatedEntry {
        visitor_name,
        visitor_nic,
        visitor_address: present(request.visitor_address.as_deref()),
        visitor_phone: present(request.visitor_phone.as_deref()),
        department_id,
        division_id: positive_id("division_id", request.division_id)?,
        purpose_of_visit,
        remarks: present(request.remarks.as_deref()),
        public_user_id: positive_id("public_user_id", request.public_user_id)?,
        visitor_type,
        created_by: positive_id("created_by", request.created_by)?,
    })
}
