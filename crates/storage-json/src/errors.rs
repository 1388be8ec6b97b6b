//! Storage-specific error types for the JSON file store.
//!
//! This module wraps I/O and JSON errors and converts them to the
//! storage-agnostic error types defined in `patrimoine_core`.

use patrimoine_core::errors::{Error, RepositoryError};
use thiserror::Error;

/// Storage-specific errors.
///
/// These errors are internal to the storage layer and are converted to
/// `patrimoine_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Writer channel closed: {0}")]
    WriterClosed(String),

    #[error("Unexpected writer result type")]
    ResultType,
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Repository(RepositoryError::Io(e.to_string())),
            StorageError::Json(e) => {
                Error::Repository(RepositoryError::Serialization(e.to_string()))
            }
            StorageError::WriterClosed(e) => {
                Error::Repository(RepositoryError::WriterUnavailable(e))
            }
            StorageError::ResultType => {
                Error::Repository(RepositoryError::Internal(StorageError::ResultType.to_string()))
            }
        }
    }
}

/// Extension trait for converting storage Results to core Results.
pub trait IntoCore<T> {
    fn into_core(self) -> patrimoine_core::Result<T>;
}

impl<T, E> IntoCore<T> for std::result::Result<T, E>
where
    E: Into<StorageError>,
{
    fn into_core(self) -> patrimoine_core::Result<T> {
        self.map_err(|e| Error::from(e.into()))
    }
}
