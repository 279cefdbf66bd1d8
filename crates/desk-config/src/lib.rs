//! # desk-config
//!
//! Layered configuration loading for auditdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUDITDESK_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`, else project-level `auditdesk.toml`
//! 3. User-level `~/.config/auditdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUDITDESK_AUTH__JWT_SECRET` -> `auth.jwt_secret`,
//! `AUDITDESK_DATABASE__BACKEND` -> `database.backend`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use desk_config::DeskConfig;
//!
//! let config = DeskConfig::load_with_dotenv(None).expect("config");
//! config.validate_for_serve().expect("auth secret set");
//! println!("listening on {}", config.server.bind);
//! ```

mod auth;
mod database;
mod error;
mod general;
mod server;
mod uploads;

pub use auth::{AuthConfig, MAX_TOKEN_TTL_HOURS};
pub use database::{BackendKind, DatabaseConfig};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;
pub use uploads::UploadsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILE: &str = "auditdesk.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DeskConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or a value has the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: explicit file, or the project-local one
        match explicit {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("AUDITDESK_").split("__"))
    }

    /// Check the settings the HTTP server cannot run without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when no signing secret is set, and
    /// `ConfigError::InvalidValue` for a token lifetime outside
    /// `1..=MAX_TOKEN_TTL_HOURS` or a zero size limit.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        if !self.auth.token_ttl_in_range() {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl_hours".into(),
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_HOURS}"),
            });
        }
        if self.uploads.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "uploads.max_file_bytes".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("auditdesk").join("config.toml"))
    }
}
