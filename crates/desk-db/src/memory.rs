//! Volatile implementation of [`Backend`].
//!
//! Collections are owned by the instance and lost on drop. The mutex exists
//! only to satisfy `Sync`; no guard is held across an `.await`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use desk_core::entities::{Audit, Company, News, User};

use crate::SEED_COMPANIES;
use crate::backend::{AuditFilter, Backend};
use crate::error::DatabaseError;
use crate::helpers::now;
use crate::records::{NewAudit, NewNews, NewUser};
use crate::updates::news::NewsUpdate;

#[derive(Debug, Default)]
struct Store {
    companies: Vec<Company>,
    users: Vec<User>,
    audits: Vec<Audit>,
    news: Vec<News>,
    next_user_id: i64,
    next_audit_id: i64,
    next_news_id: i64,
}

impl Store {
    fn seeded() -> Self {
        let created_at = now();
        let companies = SEED_COMPANIES
            .iter()
            .zip(1..)
            .map(|((name, display_name), id)| Company {
                id,
                name: (*name).to_string(),
                display_name: (*display_name).to_string(),
                created_at,
            })
            .collect();
        Self {
            companies,
            next_user_id: 1,
            next_audit_id: 1,
            next_news_id: 1,
            ..Self::default()
        }
    }
}

/// In-process backend for development and tests.
#[derive(Debug)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// A fresh store holding only the seed companies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::seeded()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, DatabaseError> {
        self.store
            .lock()
            .map_err(|_| DatabaseError::InvalidState("memory store lock poisoned".into()))
    }
}

/// Newest first: `created_at` descending, then id descending.
fn by_newest_created(a: &Audit, b: &Audit) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
}

fn by_news_order(a: &News, b: &News) -> std::cmp::Ordering {
    b.news_date
        .cmp(&a.news_date)
        .then(b.created_at.cmp(&a.created_at))
        .then(b.id.cmp(&a.id))
}

#[async_trait]
impl Backend for MemoryBackend {
    fn label(&self) -> &'static str {
        "memory"
    }

    async fn list_companies(&self) -> Result<Vec<Company>, DatabaseError> {
        let mut companies = self.lock()?.companies.clone();
        companies.sort_by(|a, b| a.display_name.cmp(&b.display_name).then(a.id.cmp(&b.id)));
        Ok(companies)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, DatabaseError> {
        Ok(self.lock()?.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn find_company_by_name(&self, name: &str) -> Result<Option<Company>, DatabaseError> {
        Ok(self.lock()?.companies.iter().find(|c| c.name == name).cloned())
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut store = self.lock()?;
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict(format!(
                "user '{}' already exists",
                user.email
            )));
        }
        let created_at = now();
        let row = User {
            id: store.next_user_id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at,
            updated_at: created_at,
        };
        store.next_user_id += 1;
        store.users.push(row.clone());
        Ok(row)
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DatabaseError> {
        let mut store = self.lock()?;
        let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(false);
        };
        user.password_hash = password_hash.to_string();
        user.updated_at = now();
        Ok(true)
    }

    async fn list_audits(&self, filter: &AuditFilter) -> Result<Vec<Audit>, DatabaseError> {
        let mut audits: Vec<Audit> = self
            .lock()?
            .audits
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        audits.sort_by(by_newest_created);
        Ok(audits)
    }

    async fn get_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        Ok(self.lock()?.audits.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_audit(&self, audit: NewAudit) -> Result<Audit, DatabaseError> {
        let mut store = self.lock()?;
        if !store.companies.iter().any(|c| c.id == audit.company_id) {
            return Err(DatabaseError::InvalidState(format!(
                "company {} does not exist",
                audit.company_id
            )));
        }
        let row = Audit {
            id: store.next_audit_id,
            company_id: audit.company_id,
            filename: audit.filename,
            original_filename: audit.original_filename,
            file_path: audit.file_path,
            file_size: audit.file_size,
            file_type: audit.file_type,
            audit_date: audit.audit_date,
            branch_number: audit.branch_number,
            description: audit.description,
            status: audit.status,
            uploaded_by: audit.uploaded_by,
            created_at: now(),
        };
        store.next_audit_id += 1;
        store.audits.push(row.clone());
        Ok(row)
    }

    async fn delete_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        let mut store = self.lock()?;
        Ok(store
            .audits
            .iter()
            .position(|a| a.id == id)
            .map(|idx| store.audits.remove(idx)))
    }

    async fn list_news(&self, limit: u32, offset: u32) -> Result<Vec<News>, DatabaseError> {
        let mut items = self.lock()?.news.clone();
        items.sort_by(by_news_order);
        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get_news(&self, id: i64) -> Result<Option<News>, DatabaseError> {
        Ok(self.lock()?.news.iter().find(|n| n.id == id).cloned())
    }

    async fn insert_news(&self, news: NewNews) -> Result<News, DatabaseError> {
        let mut store = self.lock()?;
        let created_at = now();
        let row = News {
            id: store.next_news_id,
            title: news.title,
            summary: news.summary,
            content: news.content,
            news_date: news.news_date,
            created_by: news.created_by,
            created_at,
            updated_at: created_at,
        };
        store.next_news_id += 1;
        store.news.push(row.clone());
        Ok(row)
    }

    async fn update_news(&self, id: i64, update: &NewsUpdate) -> Result<bool, DatabaseError> {
        let mut store = self.lock()?;
        let Some(item) = store.news.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        if let Some(ref title) = update.title {
            item.title.clone_from(title);
        }
        if let Some(ref summary) = update.summary {
            item.summary.clone_from(summary);
        }
        if let Some(ref content) = update.content {
            item.content.clone_from(content);
        }
        if let Some(news_date) = update.news_date {
            item.news_date = news_date;
        }
        item.updated_at = now();
        Ok(true)
    }

    async fn delete_news(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut store = self.lock()?;
        let before = store.news.len();
        store.news.retain(|n| n.id != id);
        Ok(store.news.len() < before)
    }
}
