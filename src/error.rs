//! Error types for mini-drive.

use thiserror::Error;

/// Common error type for mini-drive.
#[derive(Error, Debug)]
pub enum DriveError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from sqlx.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error (startup bootstrap).
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Session token error (malformed, expired, or wrongly signed).
    #[error("token error: {0}")]
    Token(String),

    /// Token issuance (signing) error.
    #[error("token signing error: {0}")]
    Signing(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Duplicate resource (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Filesystem storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for DriveError {
    fn from(e: sqlx::Error) -> Self {
        DriveError::Database(e.to_string())
    }
}

/// Result type alias for mini-drive operations.
pub type Result<T> = std::result::Result<T, DriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = DriveError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = DriveError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = DriveError::Conflict("email already exists".to_string());
        assert_eq!(err.to_string(), "conflict: email already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DriveError = io_err.into();
        assert!(matches!(err, DriveError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_storage_error_display() {
        let err = DriveError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "storage error: disk full");
    }
}
