//! The single error type every handler returns.
//!
//! Domain errors from the registries and the access gate converge here and
//! are rendered as `{ "error": ... }` JSON bodies.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{
    JsonRejection, PathRejection, QueryRejection,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use desk_auth::AuthError;
use desk_core::errors::{CoreError, ValidationErrors};
use desk_db::DatabaseError;

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    Unauthorized(&'static str),
    /// Carries the entity type, e.g. `"Audit"`.
    NotFound(String),
    Conflict(String),
    /// Storage or other unexpected failure. The detail is logged, never sent.
    Internal(String),
}

impl ApiError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            Self::Unauthorized(message) => json!({ "error": message }),
            Self::NotFound(entity) => json!({ "error": format!("{entity} not found") }),
            Self::Conflict(message) => json!({ "error": message }),
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                json!({ "error": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(CoreError::Validation(errors)) => Self::Validation(errors),
            DatabaseError::Core(CoreError::NotFound { entity_type, .. }) => {
                Self::NotFound(entity_type)
            }
            DatabaseError::Conflict(message) => Self::Conflict(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials"),
            AuthError::InvalidToken => Self::Unauthorized("Invalid or missing token"),
            AuthError::Validation(errors) => Self::Validation(errors),
            AuthError::Database(error) => error.into(),
            other @ (AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::TokenLifetime(_)) => Self::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid("query", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid("id", rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::invalid("file", rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        Self::invalid("file", error.body_text())
    }
}
