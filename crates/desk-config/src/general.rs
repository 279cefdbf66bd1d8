//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for audit listings.
const fn default_audit_limit() -> u32 {
    50
}

/// Default page size for news listings.
const fn default_news_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size for `GET /api/audits` when the client sends no `limit`.
    #[serde(default = "default_audit_limit")]
    pub default_audit_limit: u32,

    /// Page size for `GET /api/news` when the client sends no `limit`.
    #[serde(default = "default_news_limit")]
    pub default_news_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_audit_limit: default_audit_limit(),
            default_news_limit: default_news_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_audit_limit, 50);
        assert_eq!(config.default_news_limit, 20);
    }
}
