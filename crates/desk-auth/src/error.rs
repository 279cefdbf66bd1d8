use desk_core::errors::ValidationErrors;
use desk_db::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, tampered, or expired bearer token.
    #[error("Invalid or missing token")]
    InvalidToken,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    /// Configured token lifetime cannot be represented.
    #[error("token lifetime of {0} hours is out of range")]
    TokenLifetime(i64),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
