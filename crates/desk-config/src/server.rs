//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_environment() -> String {
    "local".to_string()
}

fn default_frontend_origin() -> String {
    "http://localhost:5500".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the HTTP API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Deployment label reported by `GET /api/health`.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Browser origin of the dashboard, allowed to call the API with credentials.
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            environment: default_environment(),
            frontend_origin: default_frontend_origin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.environment, "local");
        assert_eq!(config.frontend_origin, "http://localhost:5500");
    }
}
