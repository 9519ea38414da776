use salvo::http::StatusCode;
use thiserror::Error;

use vestibule_core::error::CoreError;
use vestibule_db::error::DbError;
use vestibule_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        Self::ServiceError(ServiceError::from(err))
    }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::ServiceError(ServiceError::ValidationError(_))
            | Self::CoreError(CoreError::ValidationError(_) | CoreError::InvalidInput(_))
            | Self::ServiceError(ServiceError::CoreError(
                CoreError::ValidationError(_) | CoreError::InvalidInput(_),
            )) => StatusCode::BAD_REQUEST,
            Self::ServiceError(ServiceError::NotAuthenticated) => StatusCode::UNAUTHORIZED,
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ServiceError(ServiceError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// Message safe to show to clients. Server-side failures collapse to a
    /// generic message; their detail is only logged.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::ServiceError(
                ServiceError::ValidationError(msg)
                | ServiceError::CoreError(
                    CoreError::ValidationError(msg) | CoreError::InvalidInput(msg),
                ),
            )
            | Self::CoreError(CoreError::ValidationError(msg) | CoreError::InvalidInput(msg)) => {
                msg.clone()
            }
            Self::ServiceError(ServiceError::NotAuthenticated) => {
                "Authentication required".to_string()
            }
            Self::ServiceError(ServiceError::NotFound(what)) => format!("{what} not found"),
            Self::ServiceError(err @ ServiceError::InvalidTransition { .. }) => err.to_string(),
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
