use anyhow::Context;
use desk_auth::AccessGate;
use desk_config::DeskConfig;
use desk_db::files::FileStore;
use desk_db::{DeskService, ListLimits};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: DeskService,
    pub gate: AccessGate,
    pub config: DeskConfig,
}

impl AppContext {
    /// Open the configured backend and wire the registries and access gate to it.
    pub async fn init(config: DeskConfig) -> anyhow::Result<Self> {
        let backend = desk_db::open_backend(&config.database)
            .await
            .context("failed to open storage backend")?;

        let files = FileStore::from_config(&config.uploads);
        let limits = ListLimits::from_config(&config.general);
        let gate = AccessGate::from_config(backend.clone(), &config.auth)
            .context("invalid auth configuration")?;
        let service = DeskService::new(backend, files, limits);

        Ok(Self {
            service,
            gate,
            config,
        })
    }

    /// Create the configured bootstrap admin if it does not exist yet.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_bootstrap_admin(&self) -> anyhow::Result<bool> {
        let Some((email, password)) = self.config.auth.bootstrap_admin() else {
            return Ok(false);
        };
        let created = self
            .gate
            .ensure_default_admin(email, password)
            .await
            .context("failed to create bootstrap admin")?;
        if created {
            tracing::info!(email, "bootstrap admin created");
        }
        Ok(created)
    }
}
