//! Access gate configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted credential lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Default credential lifetime in hours.
const fn default_token_ttl_hours() -> i64 {
    24
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Lifetime of issued tokens.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// Admin account created at startup when absent.
    #[serde(default)]
    pub bootstrap_admin_email: String,

    #[serde(default)]
    pub bootstrap_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bootstrap_admin_email: String::new(),
            bootstrap_admin_password: String::new(),
        }
    }
}

impl AuthConfig {
    /// Check if a signing secret is available.
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// Whether `token_ttl_hours` lies in `1..=MAX_TOKEN_TTL_HOURS`.
    pub const fn token_ttl_in_range(&self) -> bool {
        self.token_ttl_hours > 0 && self.token_ttl_hours <= MAX_TOKEN_TTL_HOURS
    }

    /// Bootstrap credentials, when both halves are set.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        if self.bootstrap_admin_email.is_empty() || self.bootstrap_admin_password.is_empty() {
            None
        } else {
            Some((&self.bootstrap_admin_email, &self.bootstrap_admin_password))
        }
    }
}
