//! Cross-cutting error types for auditdesk.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`, `ConfigError`) live in
//! their respective crates. The HTTP error type in `desk-server` is where all
//! of them converge.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single rejected field in a client payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of field-level validation failures.
///
/// Validators push every failure they find, so the client sees all problems
/// with a payload at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list holding exactly one failure.
    #[must_use]
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any failure names `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected failures.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was pushed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors that can be raised by any auditdesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Client payload failed one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    #[must_use]
    pub fn not_found(entity_type: &str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn collected_errors_keep_order() {
        let mut errors = ValidationErrors::new();
        errors.push("audit_date", "must be a valid date");
        errors.push("status", "must be one of aprovada, aprovada-com-aviso, reprovada");

        let err = errors.into_result().unwrap_err();
        let fields: Vec<&str> = err.fields().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["audit_date", "status"]);
        assert!(err.has_field("status"));
        assert!(!err.has_field("file"));
    }

    #[test]
    fn serializes_as_plain_array() {
        let errors = ValidationErrors::single("title", "is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "title", "message": "is required" }])
        );
    }

    #[test]
    fn not_found_message() {
        let err = CoreError::not_found("Audit", 42);
        assert_eq!(err.to_string(), "Audit not found: 42");
    }
}
