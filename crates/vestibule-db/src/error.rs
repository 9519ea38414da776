use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error(transparent)]
    CoreError(#[from] vestibule_core::error::CoreError),
}

impl DbError {
    /// Whether the failure means the store could not be reached at all, as
    /// opposed to a statement failing on a live connection.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::PoolError(_)
                | Self::DatabaseError(diesel::result::Error::BrokenTransactionManager)
        )
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
