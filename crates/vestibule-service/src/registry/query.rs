//! Read side of the registry: filtered listings, single entries and the
//! daily summary. None of these touch the registry counter.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use vestibule_core::types::{EntryStatus, OfficeTimezone};
use vestibule_db::db::connection::DbConnection;
use vestibule_db::db::enums;
use vestibule_db::db::query::registry::{self, EntryListing, EntrySelection, EntryTally};
use vestibule_db::model::registry::RegistryEntryView;

use crate::error::{ServiceError, ServiceResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters of `GET /registry`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryFilter {
    /// `YYYY-MM-DD`; today in the office timezone when absent.
    pub date: Option<String>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
    /// Defaults to `active`.
    pub status: Option<String>,
}

/// Query parameters of `GET /registry/summary`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryFilter {
    pub date: Option<String>,
    pub department_id: Option<i64>,
}

/// Visit counts for one office day. Deleted entries are not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total: i64,
    pub new_visitors: i64,
    pub existing_visitors: i64,
    pub active: i64,
    pub checked_out: i64,
    pub latest_entry_time: Option<DateTime<Utc>>,
}

/// ## Summary
/// Parses a `YYYY-MM-DD` date, defaulting to today in `tz`.
///
/// ## Errors
/// Returns `ValidationError` for anything that is not a calendar date.
pub fn resolve_date(raw: Option<&str>, tz: &OfficeTimezone) -> ServiceResult<NaiveDate> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(tz.today()),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_e| {
            ServiceError::ValidationError(format!("date must be YYYY-MM-DD, got '{raw}'"))
        }),
    }
}

/// ## Summary
/// Turns request parameters into a store-level listing filter.
///
/// ## Errors
/// Returns `ValidationError` for a malformed date or an unknown status.
pub fn resolve_filter(filter: &RegistryFilter, tz: &OfficeTimezone) -> ServiceResult<EntryListing> {
    let date = resolve_date(filter.date.as_deref(), tz)?;
    let (entry_time_from, entry_time_until) = tz.day_bounds(date)?;

    let status = match filter.status.as_deref().map(str::trim) {
        None | Some("") => EntryStatus::Active,
        Some(raw) => raw
            .parse::<EntryStatus>()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?,
    };

    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(registry::contains_pattern);

    Ok(EntryListing {
        entry_time_from,
        entry_time_until,
        department_id: filter.department_id,
        search,
        status: status.into(),
    })
}

/// ## Summary
/// Lists one day's entries with joined display names, newest first.
///
/// ## Errors
/// Returns `ValidationError` for bad parameters and store errors otherwise.
#[tracing::instrument(skip(conn, tz))]
pub async fn list_registry_entries(
    conn: &mut DbConnection<'_>,
    filter: &RegistryFilter,
    tz: &OfficeTimezone,
) -> ServiceResult<Vec<RegistryEntryView>> {
    let listing = resolve_filter(filter, tz)?;
    let entries =
        registry::load_entry_views(conn, &EntrySelection::Listing(listing)).await?;

    tracing::debug!(count = entries.len(), "Listed registry entries");

    Ok(entries)
}

/// ## Summary
/// Loads one entry by id, whatever its status.
///
/// ## Errors
/// Returns `NotFound` if no entry has this id.
#[tracing::instrument(skip(conn))]
pub async fn get_registry_entry(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> ServiceResult<RegistryEntryView> {
    registry::load_entry_views(conn, &EntrySelection::ById(id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::NotFound(format!("Registry entry {id}")))
}

/// Folds grouped counts into a summary.
#[must_use]
pub fn summarize(date: NaiveDate, tallies: &[EntryTally]) -> DailySummary {
    let mut summary = DailySummary {
        date,
        total: 0,
        new_visitors: 0,
        existing_visitors: 0,
        active: 0,
        checked_out: 0,
        latest_entry_time: None,
    };

    for tally in tallies {
        match tally.status {
            enums::EntryStatus::Deleted => continue,
            enums::EntryStatus::Active => summary.active += tally.count,
            enums::EntryStatus::CheckedOut => summary.checked_out += tally.count,
        }

        match tally.visitor_type {
            enums::VisitorType::New => summary.new_visitors += tally.count,
            enums::VisitorType::Existing => summary.existing_visitors += tally.count,
        }

        summary.total += tally.count;
        summary.latest_entry_time = summary.latest_entry_time.max(tally.latest_entry_time);
    }

    summary
}

/// ## Summary
/// Counts a day's visits by visitor type and status.
///
/// ## Errors
/// Returns `ValidationError` for a malformed date and store errors otherwise.
#[tracing::instrument(skip(conn, tz))]
pub async fn daily_summary(
    conn: &mut DbConnection<'_>,
    filter: &SummaryFilter,
    tz: &OfficeTimezone,
) -> ServiceResult<DailySummary> {
    let date = resolve_date(filter.date.as_deref(), tz)?;
    let (from, until) = tz.day_bounds(date)?;

    let tallies = registry::tally_entries(conn, from, until, filter.department_id).await?;

    Ok(summarize(date, &tallies))
}
