//! The access gate: login, token verification, and admin account management.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use tracing::{debug, info};

use desk_config::AuthConfig;
use desk_core::entities::UserInfo;
use desk_core::enums::Role;
use desk_core::errors::ValidationErrors;
use desk_db::Backend;
use desk_db::records::NewUser;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::password::{hash_password, verify_password, verify_unknown_account};

pub const MIN_LOGIN_PASSWORD_CHARS: usize = 6;
pub const MIN_NEW_PASSWORD_CHARS: usize = 8;

/// Successful login: a bearer token plus the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Trimmed, lowercased email. Records an error unless it looks like `a@b`.
fn check_email(errors: &mut ValidationErrors, raw: &str) -> String {
    let email = raw.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        errors.push("email", "must be a valid email address");
    }
    email
}

fn check_min_chars(errors: &mut ValidationErrors, field: &str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(field, format!("must be at least {min} characters"));
    }
}

pub struct AccessGate {
    backend: Arc<dyn Backend>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl AccessGate {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, secret: &str, ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            backend,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::TokenLifetime` when `token_ttl_hours` is outside
    /// `1..=MAX_TOKEN_TTL_HOURS`.
    pub fn from_config(backend: Arc<dyn Backend>, config: &AuthConfig) -> Result<Self, AuthError> {
        let ttl = config
            .token_ttl_in_range()
            .then(|| TimeDelta::try_hours(config.token_ttl_hours))
            .flatten()
            .ok_or(AuthError::TokenLifetime(config.token_ttl_hours))?;
        Ok(Self::new(backend, &config.jwt_secret, ttl))
    }

    /// Exchange credentials for a signed token.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email or short password, and
    /// `AuthError::InvalidCredentials` for an unknown email or wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let mut errors = ValidationErrors::new();
        let email = check_email(&mut errors, email);
        check_min_chars(&mut errors, "password", password, MIN_LOGIN_PASSWORD_CHARS);
        errors.into_result()?;

        let Some(user) = self.backend.find_user(&email).await? else {
            verify_unknown_account(password);
            debug!("login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash) {
            debug!(user_id = user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims::issue(&user, Utc::now(), self.ttl)?;
        let token = self.sign(&claims)?;
        info!(user_id = user.id, "login succeeded");
        Ok(LoginResponse {
            token,
            user: (&user).into(),
        })
    }

    /// Check a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any failure.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }

    /// Create another administrator account.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email, a short password, or
    /// a mismatched confirmation, and `DatabaseError::Conflict` (wrapped) when
    /// the email is taken.
    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserInfo, AuthError> {
        let mut errors = ValidationErrors::new();
        let email = check_email(&mut errors, email);
        check_min_chars(&mut errors, "password", password, MIN_NEW_PASSWORD_CHARS);
        if password != confirm_password {
            errors.push("confirmPassword", "does not match password");
        }
        errors.into_result()?;

        let user = self
            .backend
            .insert_user(NewUser {
                email,
                password_hash: hash_password(password)?,
                role: Role::Admin,
            })
            .await?;
        info!(user_id = user.id, "admin account created");
        Ok((&user).into())
    }

    /// Replace a user's password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `currentPassword`, `newPassword` or
    /// `confirmPassword`, and `AuthError::InvalidToken` when the account no
    /// longer exists.
    pub async fn update_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        let mut errors = ValidationErrors::new();
        if current_password.is_empty() {
            errors.push("currentPassword", "is required");
        }
        check_min_chars(&mut errors, "newPassword", new_password, MIN_NEW_PASSWORD_CHARS);
        if new_password != confirm_password {
            errors.push("confirmPassword", "does not match new password");
        }
        errors.into_result()?;

        let user = self
            .backend
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if !verify_password(current_password, &user.password_hash) {
            return Err(ValidationErrors::single("currentPassword", "is incorrect").into());
        }

        let hash = hash_password(new_password)?;
        if !self.backend.update_password(user_id, &hash).await? {
            return Err(AuthError::InvalidToken);
        }
        info!(user_id, "password updated");
        Ok(())
    }

    /// Create the bootstrap admin unless an account with that email exists.
    ///
    /// Returns whether an account was created.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_admin`], minus the conflict.
    pub async fn ensure_default_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        let normalized = email.trim().to_lowercase();
        if self.backend.find_user(&normalized).await?.is_some() {
            debug!(email = %normalized, "bootstrap admin already present");
            return Ok(false);
        }
        self.create_admin(&normalized, password, password).await?;
        Ok(true)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_checks() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_email(&mut errors, "  Admin@Example.COM "), "admin@example.com");
        assert!(errors.is_empty());

        for bad in ["", "admin", "@example.com", "admin@"] {
            let mut errors = ValidationErrors::new();
            check_email(&mut errors, bad);
            assert!(errors.has_field("email"), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn min_chars_counts_chars() {
        let mut errors = ValidationErrors::new();
        check_min_chars(&mut errors, "password", "ççççç", 6);
        assert!(errors.has_field("password"));
    }
}
