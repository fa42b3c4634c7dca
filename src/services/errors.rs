use thiserror::Error;

/// Error kinds surfaced by the segmentation core.
///
/// Storage failures are logged where they happen and reported as
/// [`ServiceError::ReadError`] or [`ServiceError::WriteError`]; nothing is
/// retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested user or segment does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A record with the same unique key already exists.
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("failed to read from storage")]
    ReadError,
    #[error("failed to write to storage")]
    WriteError,
    /// Caller supplied malformed arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
