//! The persistence contract shared by every storage backend.
//!
//! Registries and the access gate hold an `Arc<dyn Backend>` and never branch
//! on which implementation is behind it.

use async_trait::async_trait;
use chrono::NaiveDate;

use desk_core::entities::{Audit, Company, News, User};
use desk_core::enums::AuditStatus;

use crate::error::DatabaseError;
use crate::records::{NewAudit, NewNews, NewUser};
use crate::updates::news::NewsUpdate;

/// Conjunctive filter over stored audits. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub company_id: Option<i64>,
    pub status: Option<AuditStatus>,
    /// Inclusive lower bound on `audit_date`.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on `audit_date`.
    pub date_to: Option<NaiveDate>,
}

impl AuditFilter {
    /// Whether `audit` passes every supplied filter.
    #[must_use]
    pub fn matches(&self, audit: &Audit) -> bool {
        self.company_id.is_none_or(|id| audit.company_id == id)
            && self.status.is_none_or(|s| audit.status == s)
            && self.date_from.is_none_or(|d| audit.audit_date >= d)
            && self.date_to.is_none_or(|d| audit.audit_date <= d)
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Short name for logs (`"sql"`, `"memory"`).
    fn label(&self) -> &'static str;

    // -- companies ---------------------------------------------------------

    /// All companies, ordered by display name.
    async fn list_companies(&self) -> Result<Vec<Company>, DatabaseError>;
    async fn find_company(&self, id: i64) -> Result<Option<Company>, DatabaseError>;
    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, DatabaseError>;

    // -- users -------------------------------------------------------------

    async fn find_user(&self, email: &str) -> Result<Option<User>, DatabaseError>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;
    /// Fails with [`DatabaseError::Conflict`] when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;
    /// Replace a password hash. `false` when no such user exists.
    async fn update_password(&self, user_id: i64, password_hash: &str)
    -> Result<bool, DatabaseError>;

    // -- audits ------------------------------------------------------------

    /// Matching audits, newest-created first (ties broken by id, descending).
    async fn list_audits(&self, filter: &AuditFilter) -> Result<Vec<Audit>, DatabaseError>;
    async fn get_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError>;
    async fn insert_audit(&self, audit: NewAudit) -> Result<Audit, DatabaseError>;
    /// Remove an audit row, returning it so the caller can clean up its file.
    async fn delete_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError>;

    // -- news --------------------------------------------------------------

    /// News ordered by `news_date`, then `created_at`, then id, all descending.
    async fn list_news(&self, limit: u32, offset: u32) -> Result<Vec<News>, DatabaseError>;
    async fn get_news(&self, id: i64) -> Result<Option<News>, DatabaseError>;
    async fn insert_news(&self, news: NewNews) -> Result<News, DatabaseError>;
    /// Apply the `Some` fields of `update` and bump `updated_at`. `false` when
    /// no such item exists.
    async fn update_news(&self, id: i64, update: &NewsUpdate) -> Result<bool, DatabaseError>;
    async fn delete_news(&self, id: i64) -> Result<bool, DatabaseError>;
}
