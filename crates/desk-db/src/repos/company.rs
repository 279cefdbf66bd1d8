//! Company reads and dashboard statistics.
//!
//! Counts are derived from the full audit collection on every call.

use chrono::{DateTime, Utc};

use desk_core::entities::{Company, CompanySummary};
use desk_core::responses::StatsOverview;
use desk_core::stats;

use crate::backend::AuditFilter;
use crate::error::DatabaseError;
use crate::service::DeskService;

impl DeskService {
    /// Every company with its audit counts, ordered by display name.
    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, DatabaseError> {
        let companies = self.backend().list_companies().await?;
        let audits = self.backend().list_audits(&AuditFilter::default()).await?;
        Ok(stats::company_summaries(&companies, &audits))
    }

    /// # Errors
    ///
    /// Returns `NotFound` when no company has this id.
    pub async fn get_company(&self, id: i64) -> Result<CompanySummary, DatabaseError> {
        let company = self
            .backend()
            .find_company(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Company", id))?;
        self.summarize(&company).await
    }

    /// Look a company up by its internal name (e.g. `grand-vision`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no company has this name.
    pub async fn get_company_by_name(&self, name: &str) -> Result<CompanySummary, DatabaseError> {
        let company = self
            .backend()
            .find_company_by_name(name)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Company", name))?;
        self.summarize(&company).await
    }

    /// Status breakdown, company breakdown, and recent-upload count as of `now`.
    pub async fn stats_overview(&self, now: DateTime<Utc>) -> Result<StatsOverview, DatabaseError> {
        let companies = self.backend().list_companies().await?;
        let audits = self.backend().list_audits(&AuditFilter::default()).await?;
        Ok(stats::overview(&companies, &audits, now))
    }

    async fn summarize(&self, company: &Company) -> Result<CompanySummary, DatabaseError> {
        let filter = AuditFilter {
            company_id: Some(company.id),
            ..AuditFilter::default()
        };
        let audits = self.backend().list_audits(&filter).await?;
        Ok(stats::company_summary(company, &audits))
    }
}
