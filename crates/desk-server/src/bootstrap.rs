use anyhow::Context;
use desk_config::{BackendKind, DeskConfig};

use crate::cli::GlobalFlags;

/// Load layered configuration and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DeskConfig> {
    if let Some(path) = &flags.config
        && !path.is_file()
    {
        anyhow::bail!("config file '{}' does not exist", path.display());
    }

    let mut config = DeskConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load auditdesk configuration")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut DeskConfig, flags: &GlobalFlags) {
    if flags.memory {
        config.database.backend = BackendKind::Memory;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn memory_flag_overrides_backend() {
        let mut config = DeskConfig::default();
        let flags = GlobalFlags {
            memory: true,
            ..GlobalFlags::default()
        };
        apply_overrides(&mut config, &flags);
        assert_eq!(config.database.backend, BackendKind::Memory);
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let mut config = DeskConfig::default();
        apply_overrides(&mut config, &GlobalFlags::default());
        assert_eq!(config.database.backend, BackendKind::Sql);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let flags = GlobalFlags {
            config: Some(PathBuf::from("/definitely/not/here/auditdesk.toml")),
            ..GlobalFlags::default()
        };
        let error = load_config(&flags).unwrap_err();
        assert!(error.to_string().contains("does not exist"));
    }
}
