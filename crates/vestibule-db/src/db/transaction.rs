//! Transaction helper utilities for database operations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diesel_async::scoped_futures::ScopedFutureExt;
//! use crate::db::transaction::with_transaction;
//!
//! with_transaction(conn, |tx| async move {
//!     let seq = sequence::next_registry_sequence(tx, "registry").await?;
//!     registry::insert_entry(tx, &entry).await?;
//!     Ok(())
//! }.scope_boxed()).await?;
//! ```
//!
//! The transaction rolls back whenever the closure returns `Err`, including
//! errors raised after earlier statements succeeded.

use diesel_async::{AsyncConnection, scoped_futures::ScopedBoxFuture};

use crate::db::connection::DbConnection;

/// ## Summary
/// Runs a database transaction and returns the closure result.
///
/// The error type is generic so callers keep their own error enums; it only
/// has to absorb diesel errors raised by `BEGIN`/`COMMIT`/`ROLLBACK`.
///
/// ## Errors
/// Returns any error produced by the closure, or errors raised while starting
/// or committing the transaction.
pub async fn with_transaction<'a, 'conn, T, E, F>(
    conn: &'conn mut DbConnection<'a>,
    callback: F,
) -> Result<T, E>
where
    F: for<'r> FnOnce(&'r mut DbConnection<'a>) -> ScopedBoxFuture<'conn, 'r, Result<T, E>>
        + Send
        + 'conn,
    T: Send + 'conn,
    E: From<diesel::result::Error> + Send + 'conn,
{
    conn.transaction::<_, E, _>(callback).await
}
