//! # desk-db
//!
//! Persistence for auditdesk.
//!
//! Defines the storage contract ([`Backend`]) with a durable libSQL
//! implementation and a volatile in-memory one, the upload file store, and
//! the [`DeskService`] registries built on top of them. Callers pick a backend
//! once through [`open_backend`] and never branch on it afterwards.

pub mod backend;
pub mod error;
pub mod files;
pub mod helpers;
pub mod memory;
pub mod records;
pub mod repos;
pub mod service;
pub mod sql;
pub mod updates;

use std::sync::Arc;

use desk_config::{BackendKind, DatabaseConfig};
use tracing::info;

pub use backend::{AuditFilter, Backend};
pub use error::DatabaseError;
pub use memory::MemoryBackend;
pub use service::{DeskService, ListLimits};
pub use sql::SqlBackend;

/// Companies present in every store: `(internal name, display name)`.
pub const SEED_COMPANIES: &[(&str, &str)] = &[
    ("carol", "Carol"),
    ("grand-vision", "Grand Vision"),
    ("sunglass-hut", "SunglassHut"),
];

/// Open the backend selected by configuration.
///
/// # Errors
///
/// Returns `DatabaseError` if the SQL database cannot be opened or migrated.
pub async fn open_backend(config: &DatabaseConfig) -> Result<Arc<dyn Backend>, DatabaseError> {
    let backend: Arc<dyn Backend> = match config.backend {
        BackendKind::Sql => Arc::new(SqlBackend::open_local(&config.path).await?),
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    };
    info!(
        backend = backend.label(),
        path = %config.path,
        durable = config.is_durable(),
        "storage backend opened"
    );
    Ok(backend)
}
