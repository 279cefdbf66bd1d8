//! Response shapes returned by the registries and serialized by the HTTP API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditStatus;

/// Number of audits carrying one status.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusCount {
    pub status: AuditStatus,
    pub count: u64,
}

/// Number of audits for one company, keyed by display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompanyCount {
    pub company: String,
    pub count: u64,
}

/// Payload of `GET /api/audits/stats/overview`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatsOverview {
    pub status_breakdown: Vec<StatusCount>,
    pub company_breakdown: Vec<CompanyCount>,
    /// Audits created within the trailing 30-day window.
    pub recent_audits: u64,
}

impl StatsOverview {
    /// Count for `status`, zero when the status is absent from the breakdown.
    #[must_use]
    pub fn count_for(&self, status: AuditStatus) -> u64 {
        self.status_breakdown
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }

    /// Sum of all status buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.status_breakdown.iter().map(|s| s.count).sum()
    }
}

/// One page of a filtered listing plus the unpaginated total.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}
