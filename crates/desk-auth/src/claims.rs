use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use desk_core::entities::{User, UserInfo};
use desk_core::enums::Role;

use crate::error::AuthError;

/// Session token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Claims for `user`, issued at `now` and valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` when `now + ttl` leaves the calendar range.
    pub fn issue(user: &User, now: DateTime<Utc>, ttl: TimeDelta) -> Result<Self, AuthError> {
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Signing(format!("expiry {ttl} after {now} overflows")))?;
        Ok(Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        })
    }

    #[must_use]
    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.sub,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "admin@example.com".into(),
            password_hash: "irrelevant".into(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_sets_window() {
        let now = Utc::now();
        let claims = Claims::issue(&user(), now, TimeDelta::hours(24)).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn overflowing_expiry_is_an_error() {
        let err = Claims::issue(&user(), Utc::now(), TimeDelta::MAX).unwrap_err();
        assert!(matches!(err, AuthError::Signing(_)));
    }

    #[test]
    fn user_info_projects_identity() {
        let claims = Claims::issue(&user(), Utc::now(), TimeDelta::hours(1)).unwrap();
        let info = claims.user_info();
        assert_eq!(info.id, 7);
        assert_eq!(info.email, "admin@example.com");
        assert_eq!(info.role, Role::Admin);
    }

    #[test]
    fn serializes_role_as_wire_value() {
        let claims = Claims::issue(&user(), Utc::now(), TimeDelta::hours(1)).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["sub"], 7);
    }
}
