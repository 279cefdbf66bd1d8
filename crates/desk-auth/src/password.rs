//! Argon2id password hashing.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so
//! verification never needs anything but the stored string.

use std::sync::LazyLock;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::warn;

use crate::error::AuthError;

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if the OS random source or the hasher fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::fill(&mut salt_bytes)
        .map_err(|e| AuthError::Hashing(format!("failed to generate salt: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check `password` against a stored PHC string. A malformed hash never matches.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is not a valid PHC string");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hash of a throwaway secret, checked when no account matches a login so
/// unknown emails cost the same argon2 work as wrong passwords.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("auditdesk-unknown-account").ok());

/// Run a full verification that always fails.
pub fn verify_unknown_account(password: &str) {
    match UNKNOWN_ACCOUNT_HASH.as_deref() {
        Some(hash) => {
            let _ = verify_password(password, hash);
        }
        None => warn!("placeholder password hash unavailable"),
    }
}
