//! Error types for Gatepost.

use thiserror::Error;

/// Common error type for Gatepost.
#[derive(Error, Debug)]
pub enum GatepostError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from the storage backend.
    /// sqlx errors are converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness conflict (duplicate email, name, or post code).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Outbound mail error.
    #[error("mail error: {0}")]
    Mail(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for GatepostError {
    fn from(e: sqlx::Error) -> Self {
        GatepostError::Database(e.to_string())
    }
}

/// Result type alias for Gatepost operations.
pub type Result<T> = std::result::Result<T, GatepostError>;
