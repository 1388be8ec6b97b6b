//! Core error types for the patrimoine application.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (file I/O, JSON encoding) are converted to these types by the storage layer.

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation core.
///
/// Every failure is reported to the caller; nothing is defaulted or retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Possession '{label}' not found for owner '{owner}'")]
    RecordNotFound { owner: String, label: String },

    #[error("Possession '{label}' is already closed since {end_date}")]
    AlreadyClosed { label: String, end_date: NaiveDate },

    #[error("Owner '{owner}' already has an open possession labelled '{label}'")]
    DuplicateLabel { owner: String, label: String },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository operation failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Storage-agnostic error type for repository operations.
///
/// Details are carried as strings so the storage crate can map its own
/// error types without leaking them into the core.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Reading or writing the backing store failed.
    #[error("I/O failure: {0}")]
    Io(String),

    /// The backing store holds data that cannot be encoded or decoded.
    #[error("Serialization failure: {0}")]
    Serialization(String),

    /// The writer task is gone and can no longer accept mutations.
    #[error("Writer unavailable: {0}")]
    WriterUnavailable(String),

    #[error("Internal repository error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl Error {
    /// Shorthand for an `InvalidInput` validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    pub fn not_found(owner: &str, label: &str) -> Self {
        Error::RecordNotFound {
            owner: owner.to_string(),
            label: label.to_string(),
        }
    }
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}
