//! libSQL-backed implementation of [`Backend`].
//!
//! Uses the `libsql` crate (C `SQLite` fork) with a local file or `":memory:"`.
//! Query code lives in one module per table; the trait impl below only
//! delegates.

mod audits;
mod companies;
mod migrations;
mod news;
mod users;

use async_trait::async_trait;
use libsql::Builder;
use tracing::debug;

use desk_core::entities::{Audit, Company, News, User};

use crate::backend::{AuditFilter, Backend};
use crate::error::DatabaseError;
use crate::records::{NewAudit, NewNews, NewUser};
use crate::updates::news::NewsUpdate;

/// Durable backend over a libSQL database.
pub struct SqlBackend {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SqlBackend {
    /// Open a local database at the given path (`":memory:"` for a throwaway one).
    ///
    /// Runs migrations and seeds the company table on every open; both steps
    /// are idempotent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let backend = Self { db, conn };
        backend.run_migrations().await?;
        backend.seed_companies().await?;
        debug!(path, "sql backend ready");
        Ok(backend)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[async_trait]
impl Backend for SqlBackend {
    fn label(&self) -> &'static str {
        "sql"
    }

    async fn list_companies(&self) -> Result<Vec<Company>, DatabaseError> {
        self.select_companies().await
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, DatabaseError> {
        self.select_company_by_id(id).await
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, DatabaseError> {
        self.select_company_by_name(name).await
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.select_user_by_email(email).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.select_user_by_id(id).await
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.insert_user_row(user).await
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DatabaseError> {
        self.update_password_hash(user_id, password_hash).await
    }

    async fn list_audits(&self, filter: &AuditFilter) -> Result<Vec<Audit>, DatabaseError> {
        self.select_audits(filter).await
    }

    async fn get_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        self.select_audit(id).await
    }

    async fn insert_audit(&self, audit: NewAudit) -> Result<Audit, DatabaseError> {
        self.insert_audit_row(audit).await
    }

    async fn delete_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        self.delete_audit_row(id).await
    }

    async fn list_news(&self, limit: u32, offset: u32) -> Result<Vec<News>, DatabaseError> {
        self.select_news_page(limit, offset).await
    }

    async fn get_news(&self, id: i64) -> Result<Option<News>, DatabaseError> {
        self.select_news(id).await
    }

    async fn insert_news(&self, news: NewNews) -> Result<News, DatabaseError> {
        self.insert_news_row(news).await
    }

    async fn update_news(&self, id: i64, update: &NewsUpdate) -> Result<bool, DatabaseError> {
        self.update_news_row(id, update).await
    }

    async fn delete_news(&self, id: i64) -> Result<bool, DatabaseError> {
        self.delete_news_row(id).await
    }
}
