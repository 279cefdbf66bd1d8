use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A tenant/brand the dashboard tracks audits for. Seed data only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    /// Internal key, unique (e.g. `grand-vision`).
    pub name: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A company together with its derived audit counts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompanySummary {
    #[serde(flatten)]
    pub company: Company,
    pub total_audits: u64,
    pub approved_audits: u64,
    pub approved_with_warning_audits: u64,
    pub rejected_audits: u64,
    /// Most recent `audit_date` among the company's audits.
    pub last_audit_date: Option<NaiveDate>,
}
