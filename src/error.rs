use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

/// Errors surfaced by the service layer.
///
/// Absence on lookups is not an error: those operations return `Option` or
/// `bool`. `NotFound` is reserved for operations that need a parent record
/// to exist (commenting on a post, replying to a comment).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("post with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("email '{0}' is already subscribed")]
    AlreadySubscribed(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Store(#[from] DbErr),
}

impl ServiceError {
    /// Short machine-readable code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::DuplicateSlug(_) => "duplicate_slug",
            ServiceError::AlreadySubscribed(_) => "already_subscribed",
            ServiceError::Validation(_) => "validation_error",
            ServiceError::Store(_) => "store_error",
        }
    }

    /// Maps a unique constraint violation to `conflict`, anything else to `Store`.
    pub fn on_conflict(err: DbErr, conflict: impl FnOnce() -> ServiceError) -> ServiceError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => conflict(),
            _ => ServiceError::Store(err),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
