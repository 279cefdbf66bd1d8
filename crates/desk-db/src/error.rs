//! Database error types for desk-db.

use desk_core::errors::{CoreError, ValidationErrors};
use thiserror::Error;

/// Errors from backend and registry operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in storage, poisoned lock).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness rule was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Domain-level rejection (validation, not found).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Upload file I/O failed.
    #[error("File storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationErrors> for DatabaseError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Core(CoreError::Validation(errors))
    }
}

impl DatabaseError {
    /// Shorthand for a domain-level not-found.
    #[must_use]
    pub fn not_found(entity_type: &str, id: impl std::fmt::Display) -> Self {
        Self::Core(CoreError::not_found(entity_type, id))
    }

    /// The field errors, when this is a validation rejection.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Core(CoreError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}
