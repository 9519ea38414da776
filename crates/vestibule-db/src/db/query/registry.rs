//! Query functions for registry entries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::enums::{EntryStatus, VisitorType};
use crate::db::schema::{departments, divisions, public_users, registry_entries};
use crate::model::registry::{NewRegistryEntry, RegistryEntry, RegistryEntryView};

/// Query for one entry row by surrogate id.
pub type EntryById = diesel::dsl::Select<
    diesel::dsl::Filter<registry_entries::table, diesel::dsl::Eq<registry_entries::id, i64>>,
    diesel::dsl::AsSelect<RegistryEntry, diesel::pg::Pg>,
>;

/// Which entries to load as joined views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySelection {
    /// A single entry, whatever its status.
    ById(i64),
    /// Entries matching a listing filter.
    Listing(EntryListing),
}

/// Listing filter. `search` must already be a LIKE pattern (see [`contains_pattern`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListing {
    pub entry_time_from: DateTime<Utc>,
    pub entry_time_until: DateTime<Utc>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
    pub status: EntryStatus,
}

/// ## Summary
/// Escapes LIKE metacharacters and wraps the term for substring matching.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// ## Summary
/// Returns a query to find an entry by surrogate id.
#[must_use]
pub fn by_id(id: i64) -> EntryById {
    registry_entries::table
        .filter(registry_entries::id.eq(id))
        .select(RegistryEntry::as_select())
}

/// ## Summary
/// Inserts a new entry and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails, including unique violations
/// on `registry_id`.
pub async fn insert_entry(
    conn: &mut DbConnection<'_>,
    new_entry: &NewRegistryEntry<'_>,
) -> diesel::QueryResult<RegistryEntry> {
    diesel::insert_into(registry_entries::table)
        .values(new_entry)
        .returning(RegistryEntry::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads an entry and locks its row until the transaction ends.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn lock_entry(
    conn: &mut DbConnection<'_>,
    id: i64,
) -> diesel::QueryResult<Option<RegistryEntry>> {
    by_id(id)
        .for_update()
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Sets an entry's status and bumps `updated_at`. Visitor fields are never touched.
///
/// ## Errors
/// Returns a database error if the update fails or the entry does not exist.
pub async fn set_status(
    conn: &mut DbConnection<'_>,
    id: i64,
    status: EntryStatus,
) -> diesel::QueryResult<RegistryEntry> {
    diesel::update(registry_entries::table.filter(registry_entries::id.eq(id)))
        .set((
            registry_entries::status.eq(status),
            registry_entries::updated_at.eq(diesel::dsl::now),
        ))
        .returning(RegistryEntry::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads entries joined with department, division and public-user display
/// names, newest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn load_entry_views(
    conn: &mut DbConnection<'_>,
    selection: &EntrySelection,
) -> diesel::QueryResult<Vec<RegistryEntryView>> {
    let mut query = registry_entries::table
        .left_join(departments::table.on(departments::id.eq(registry_entries::department_id)))
        .left_join(
            divisions::table.on(divisions::id.nullable().eq(registry_entries::division_id)),
        )
        .left_join(
            public_users::table
                .on(public_users::id.nullable().eq(registry_entries::public_user_id)),
        )
        .select((
            RegistryEntry::as_select(),
            departments::name.nullable(),
            divisions::name.nullable(),
            public_users::name.nullable(),
            public_users::public_id.nullable(),
        ))
        .into_boxed();

    match selection {
        EntrySelection::ById(id) => {
            query = query.filter(registry_entries::id.eq(*id));
        }
        EntrySelection::Listing(listing) => {
            query = query
                .filter(registry_entries::status.eq(listing.status))
                .filter(registry_entries::entry_time.ge(listing.entry_time_from))
                .filter(registry_entries::entry_time.lt(listing.entry_time_until));

            if let Some(department_id) = listing.department_id {
                query = query.filter(registry_entries::department_id.eq(department_id));
            }

            if let Some(pattern) = &listing.search {
                query = query.filter(
                    registry_entries::visitor_name
                        .ilike(pattern.clone())
                        .or(registry_entries::visitor_nic.ilike(pattern.clone()))
                        .or(registry_entries::registry_id.ilike(pattern.clone())),
                );
            }
        }
    }

    let rows = query
        .order((
            registry_entries::entry_time.desc(),
            registry_entries::id.desc(),
        ))
        .load::<(
            RegistryEntry,
            Option<String>,
            Option<String>,
            Option<String>,
            Option<String>,
        )>(conn)
        .await?;

    Ok(rows.into_iter().map(RegistryEntryView::from).collect())
}

/// One `(visitor_type, status)` bucket of a day's entries.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct EntryTally {
    pub visitor_type: VisitorType,
    pub status: EntryStatus,
    pub count: i64,
    pub latest_entry_time: Option<DateTime<Utc>>,
}

/// ## Summary
/// Counts entries in a time window grouped by visitor type and status.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn tally_entries(
    conn: &mut DbConnection<'_>,
    entry_time_from: DateTime<Utc>,
    entry_time_until: DateTime<Utc>,
    department_id: Option<i64>,
) -> diesel::QueryResult<Vec<EntryTally>> {
    // group_by has to be applied before boxing; filters only touch WHERE.
    let mut query = registry_entries::table
        .group_by((registry_entries::visitor_type, registry_entries::status))
        .select((
            registry_entries::visitor_type,
            registry_entries::status,
            diesel::dsl::count_star(),
            diesel::dsl::max(registry_entries::entry_time),
        ))
        .filter(registry_entries::entry_time.ge(entry_time_from))
        .filter(registry_entries::entry_time.lt(entry_time_until))
        .into_boxed();

    if let Some(department_id) = department_id {
        query = query.filter(registry_entries::department_id.eq(department_id));
    }

    query.load::<EntryTally>(conn).await
}
