use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Errors surfaced by repository implementations.
///
/// Store-specific failure types stop at this layer: callers above the
/// repository only ever see these variants.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested row does not exist.
    #[error("entity not found")]
    NotFound,
    /// A write was rejected because other rows still reference the target.
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    #[error("validation error: {0}")]
    Validation(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                RepositoryError::IntegrityViolation(info.message().to_string())
            }
            err => RepositoryError::Database(err),
        }
    }
}
