use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditStatus;

/// One uploaded compliance record. Created on upload, never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Audit {
    pub id: i64,
    pub company_id: i64,
    /// Name of the stored file on the upload medium.
    pub filename: String,
    pub original_filename: String,
    pub file_path: String,
    pub file_size: u64,
    /// MIME type reported by the uploader.
    pub file_type: String,
    pub audit_date: NaiveDate,
    pub branch_number: String,
    pub description: Option<String>,
    pub status: AuditStatus,
    pub uploaded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// An audit joined with its company display name and uploader email.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditView {
    #[serde(flatten)]
    pub audit: Audit,
    pub company_name: String,
    pub uploaded_by_email: Option<String>,
}
