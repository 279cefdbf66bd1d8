//! Shared fixtures for desk-db integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use desk_core::entities::{Audit, Company, News, User};
use desk_core::enums::Role;
use desk_db::files::{FileStore, UploadedFile};
use desk_db::records::{NewAudit, NewNews, NewUser};
use desk_db::repos::audit::AuditUpload;
use desk_db::updates::news::NewsUpdate;
use desk_db::{
    AuditFilter, Backend, DatabaseError, DeskService, ListLimits, MemoryBackend, SqlBackend,
};

pub const CAROL: i64 = 1;

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Sql,
    Memory,
}

pub async fn backend(kind: Kind) -> Arc<dyn Backend> {
    match kind {
        Kind::Sql => Arc::new(SqlBackend::open_local(":memory:").await.unwrap()),
        Kind::Memory => Arc::new(MemoryBackend::new()),
    }
}

/// A service over a fresh backend, uploading into a temp dir that lives as
/// long as the harness.
pub struct Harness {
    pub service: DeskService,
    pub uploads: TempDir,
}

pub async fn harness(kind: Kind) -> Harness {
    harness_over(backend(kind).await)
}

pub fn harness_over(backend: Arc<dyn Backend>) -> Harness {
    let uploads = TempDir::new().unwrap();
    let files = FileStore::new(uploads.path(), 1024 * 1024);
    let service = DeskService::new(backend, files, ListLimits::default());
    Harness { service, uploads }
}

impl Harness {
    pub async fn admin(&self) -> i64 {
        self.service
            .backend()
            .insert_user(NewUser {
                email: "admin@example.com".into(),
                password_hash: "not-a-real-hash".into(),
                role: Role::Admin,
            })
            .await
            .unwrap()
            .id
    }

    /// Number of files currently in the upload dir.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.uploads.path()).unwrap().count()
    }
}

pub fn pdf() -> UploadedFile {
    UploadedFile {
        original_name: "relatorio.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: b"%PDF-1.7 test".to_vec(),
    }
}

pub fn upload(company_id: i64, status: &str, audit_date: &str) -> AuditUpload {
    AuditUpload {
        company_id: company_id.to_string(),
        audit_date: audit_date.into(),
        branch_number: " 0042 ".into(),
        description: Some("Monthly check".into()),
        status: status.into(),
        file: Some(pdf()),
    }
}

/// A memory backend whose audit inserts always fail.
pub struct FailingAuditInserts(pub MemoryBackend);

#[async_trait]
impl Backend for FailingAuditInserts {
    fn label(&self) -> &'static str {
        "failing-inserts"
    }

    async fn list_companies(&self) -> Result<Vec<Company>, DatabaseError> {
        self.0.list_companies().await
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, DatabaseError> {
        self.0.find_company(id).await
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, DatabaseError> {
        self.0.find_company_by_name(name).await
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.0.find_user(email).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.0.find_user_by_id(id).await
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        self.0.insert_user(user).await
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DatabaseError> {
        self.0.update_password(user_id, password_hash).await
    }

    async fn list_audits(&self, filter: &AuditFilter) -> Result<Vec<Audit>, DatabaseError> {
        self.0.list_audits(filter).await
    }

    async fn get_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        self.0.get_audit(id).await
    }

    async fn insert_audit(&self, _audit: NewAudit) -> Result<Audit, DatabaseError> {
        Err(DatabaseError::Query("disk I/O error".into()))
    }

    async fn delete_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        self.0.delete_audit(id).await
    }

    async fn list_news(&self, limit: u32, offset: u32) -> Result<Vec<News>, DatabaseError> {
        self.0.list_news(limit, offset).await
    }

    async fn get_news(&self, id: i64) -> Result<Option<News>, DatabaseError> {
        self.0.get_news(id).await
    }

    async fn insert_news(&self, news: NewNews) -> Result<News, DatabaseError> {
        self.0.insert_news(news).await
    }

    async fn update_news(&self, id: i64, update: &NewsUpdate) -> Result<bool, DatabaseError> {
        self.0.update_news(id, update).await
    }

    async fn delete_news(&self, id: i64) -> Result<bool, DatabaseError> {
        self.0.delete_news(id).await
    }
}
