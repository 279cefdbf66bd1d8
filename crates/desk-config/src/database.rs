//! Persistence backend selection.

use serde::{Deserialize, Serialize};

/// Which implementation of the persistence contract to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// libSQL file (or `:memory:`), survives restarts.
    #[default]
    Sql,
    /// Process-lifetime collections, lost on shutdown.
    Memory,
}

fn default_path() -> String {
    "auditdesk.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// libSQL database path. Ignored by the memory backend.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether data survives a process restart with this configuration.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.backend == BackendKind::Sql && self.path != ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sql_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.backend, BackendKind::Sql);
        assert_eq!(config.path, "auditdesk.db");
        assert!(config.is_durable());
    }

    #[test]
    fn memory_variants_are_not_durable() {
        let memory = DatabaseConfig {
            backend: BackendKind::Memory,
            ..Default::default()
        };
        assert!(!memory.is_durable());

        let sql_in_memory = DatabaseConfig {
            path: ":memory:".into(),
            ..Default::default()
        };
        assert!(!sql_in_memory.is_durable());
    }
}
