use desk_config::DeskConfig;

const SECTIONS: [&str; 5] = ["SERVER", "DATABASE", "UPLOADS", "AUTH", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &DeskConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &DeskConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("AUDITDESK_{section}_");
        let double = format!("AUDITDESK_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{section} env vars use a single underscore and were ignored. Use double underscores (example: {double}...)."
            ));
        }
    }

    if !config.auth.is_configured() && has_env_prefix(&env_keys, "JWT_SECRET") {
        warnings.push(
            "JWT_SECRET is set but auth.jwt_secret is empty. Use AUDITDESK_AUTH__JWT_SECRET."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use desk_config::DeskConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = DeskConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("AUDITDESK_AUTH_JWT_SECRET".to_string(), "s3cret".to_string()),
                ("AUDITDESK_DATABASE_BACKEND".to_string(), "memory".to_string()),
                ("JWT_SECRET".to_string(), "legacy".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn does_not_warn_for_well_formed_keys() {
        let mut config = DeskConfig::default();
        config.auth.jwt_secret = "s3cret".to_string();

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("AUDITDESK_AUTH__JWT_SECRET".to_string(), "s3cret".to_string()),
                ("AUDITDESK_LOG".to_string(), "debug".to_string()),
                ("JWT_SECRET".to_string(), "legacy".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }
}
