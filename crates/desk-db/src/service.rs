//! Service layer tying a backend to the upload store.
//!
//! `DeskService` wraps an `Arc<dyn Backend>` (storage) and a `FileStore`
//! (upload bytes). The audit and news registries and the company/statistics
//! reads are implemented as `impl DeskService` blocks in `repos/`.

use std::collections::HashMap;
use std::sync::Arc;

use desk_config::GeneralConfig;

use crate::backend::Backend;
use crate::error::DatabaseError;
use crate::files::FileStore;

/// Page-size bounds for the listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub default_audit_limit: u32,
    pub max_audit_limit: u32,
    pub default_company_audit_limit: u32,
    pub default_news_limit: u32,
    pub max_news_limit: u32,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self::from_config(&GeneralConfig::default())
    }
}

impl ListLimits {
    #[must_use]
    pub const fn from_config(config: &GeneralConfig) -> Self {
        Self {
            default_audit_limit: config.default_audit_limit,
            max_audit_limit: 500,
            default_company_audit_limit: 20,
            default_news_limit: config.default_news_limit,
            max_news_limit: 100,
        }
    }
}

/// Clamp a requested page size into `1..=max`, using `default` when absent.
#[must_use]
pub fn clamp_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, max.max(1))
}

pub struct DeskService {
    backend: Arc<dyn Backend>,
    files: FileStore,
    limits: ListLimits,
}

impl DeskService {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, files: FileStore, limits: ListLimits) -> Self {
        Self {
            backend,
            files,
            limits,
        }
    }

    /// Access the storage backend.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    #[must_use]
    pub const fn files(&self) -> &FileStore {
        &self.files
    }

    #[must_use]
    pub const fn limits(&self) -> ListLimits {
        self.limits
    }

    /// Resolve user ids to emails, one lookup per distinct id.
    pub(crate) async fn user_emails(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, String>, DatabaseError> {
        let mut emails = HashMap::new();
        for id in ids {
            if emails.contains_key(&id) {
                continue;
            }
            if let Some(user) = self.backend.find_user_by_id(id).await? {
                emails.insert(id, user.email);
            }
        }
        Ok(emails)
    }
}
