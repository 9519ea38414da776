//! Counter-backed sequence numbers for registry ids.

use diesel::sql_types::{BigInt, Text};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryableByName};
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::registry_sequence;

/// Bumps an existing counter row. The row lock is held until the surrounding
/// transaction ends; concurrent callers queue behind it and a rollback returns
/// the number to the pool.
const ADVANCE_SEQUENCE_SQL: &str = r"
UPDATE registry_sequence
SET last_value = last_value + 1
WHERE name = $1
RETURNING last_value
";

/// Creates a missing counter row, seeded from the highest existing
/// `REG<digits>` suffix (compared numerically) so numbering continues after
/// data imported without a counter. A concurrent seeder that wins the insert
/// turns this into a plain increment.
const SEED_SEQUENCE_SQL: &str = r"
INSERT INTO registry_sequence (name, last_value)
SELECT $1, COALESCE(MAX(CAST(SUBSTRING(registry_id FROM 4) AS BIGINT)), 0) + 1
FROM registry_entries
WHERE registry_id ~ '^REG[0-9]+$'
ON CONFLICT (name) DO UPDATE SET last_value = registry_sequence.last_value + 1
RETURNING last_value
";

#[derive(Debug, QueryableByName)]
struct SequenceRow {
    #[diesel(sql_type = BigInt)]
    last_value: i64,
}

/// ## Summary
/// Reserves the next sequence number for `name`.
///
/// Only the first reservation for a name scans `registry_entries`; later ones
/// touch the counter row alone.
///
/// Must be called inside the transaction that inserts the row the number is
/// for; outside a transaction the lock is released immediately and the number
/// is consumed even if the insert later fails.
///
/// ## Errors
/// Returns a database error if the statement fails.
#[tracing::instrument(skip(conn))]
pub async fn next_registry_sequence(
    conn: &mut DbConnection<'_>,
    name: &str,
) -> diesel::QueryResult<i64> {
    let advanced = diesel::sql_query(ADVANCE_SEQUENCE_SQL)
        .bind::<Text, _>(name)
        .get_result::<SequenceRow>(conn)
        .await
        .optional()?;

    let row = match advanced {
        Some(row) => row,
        None => {
            tracing::debug!("Seeding registry counter from existing entries");
            diesel::sql_query(SEED_SEQUENCE_SQL)
                .bind::<Text, _>(name)
                .get_result::<SequenceRow>(conn)
                .await?
        }
    };

    tracing::trace!(last_value = row.last_value, "Reserved sequence number");

    Ok(row.last_value)
}

/// ## Summary
/// Reads the current counter value without reserving anything.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn current_registry_sequence(
    conn: &mut DbConnection<'_>,
    name: &str,
) -> diesel::QueryResult<Option<i64>> {
    registry_sequence::table
        .filter(registry_sequence::name.eq(name))
        .select(registry_sequence::last_value)
        .first::<i64>(conn)
        .await
        .optional()
}
