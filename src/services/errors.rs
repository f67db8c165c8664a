use thiserror::Error;

/// Application-level error taxonomy exposed to the request layer.
///
/// Repository failures are translated into these kinds at the service
/// boundary; nothing store-specific crosses it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested id (product or referenced category) does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// A persistence-layer integrity or generic failure condition; carries a
    /// human-readable message only.
    #[error("database error: {0}")]
    Database(String),
    /// Caller-supplied pagination or filter parameters are malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The caller lacks the role required for the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
