//! Core error types for DRT.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//!
//! A student or semester that the remote service does not know about is not an
//! error. Those outcomes travel as [`crate::sync::SyncOutcome::NotFound`].

use drt_remote::RemoteError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for synchronization.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Remote lookup failed: {0}")]
    Remote(#[from] RemoteError),

    /// Storage refused to create the student row, e.g. because a concurrent
    /// sync created it first. Not retried.
    #[error("Failed to create student {student_id}: {source}")]
    StudentCreationFailed {
        student_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to create result {student_id}/{semester_id}/{course_id}: {source}")]
    ResultCreationFailed {
        student_id: String,
        semester_id: String,
        course_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true if the remote service could not be consulted.
    ///
    /// Operators use this to tell "could not determine" apart from a
    /// confirmed absence.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Remote(_))
    }

    /// Returns true if storage rejected a create because the key already exists.
    pub fn is_creation_conflict(&self) -> bool {
        match self {
            Error::StudentCreationFailed { source, .. }
            | Error::ResultCreationFailed { source, .. } => matches!(
                source.as_ref(),
                Error::Database(DatabaseError::UniqueViolation(_))
            ),
            Error::Database(DatabaseError::UniqueViolation(_)) => true,
            _ => false,
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for remote payloads and user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let err = Error::from(RemoteError::MalformedPayload("bad".to_string()));
        assert!(err.is_transport());

        let err = Error::Database(DatabaseError::QueryFailed("boom".to_string()));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_creation_conflict_detection() {
        let err = Error::StudentCreationFailed {
            student_id: "181-15-955".to_string(),
            source: Box::new(Error::Database(DatabaseError::UniqueViolation(
                "students.student_id".to_string(),
            ))),
        };
        assert!(err.is_creation_conflict());
        assert!(err.to_string().contains("181-15-955"));

        let err = Error::ResultCreationFailed {
            student_id: "181-15-955".to_string(),
            semester_id: "221".to_string(),
            course_id: "CSE111".to_string(),
            source: Box::new(Error::Database(DatabaseError::ForeignKeyViolation(
                "semester_results.student_id".to_string(),
            ))),
        };
        assert!(!err.is_creation_conflict());
        assert!(err.to_string().contains("181-15-955/221/CSE111"));
    }
}
