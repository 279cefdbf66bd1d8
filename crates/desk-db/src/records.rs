//! Insert payloads. Ids and creation timestamps are assigned by the backend.

use chrono::NaiveDate;

use desk_core::enums::{AuditStatus, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAudit {
    pub company_id: i64,
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_size: u64,
    pub file_type: String,
    pub audit_date: NaiveDate,
    pub branch_number: String,
    pub description: Option<String>,
    pub status: AuditStatus,
    pub uploaded_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNews {
    pub title: String,
    pub summary: String,
    pub content: Option<String>,
    pub news_date: NaiveDate,
    pub created_by: Option<i64>,
}
