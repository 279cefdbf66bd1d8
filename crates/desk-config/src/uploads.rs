//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// 10 MiB.
const fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_dir() -> String {
    "uploads".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadsConfig {
    /// Directory receiving uploaded audit files. Created on demand.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Largest accepted file.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = UploadsConfig::default();
        assert_eq!(config.dir, "uploads");
        assert_eq!(config.max_file_bytes, 10_485_760);
    }
}
