//! Aggregation engine.
//!
//! Every statistic is derived on read from the current audit collection; no
//! counter is ever stored or updated incrementally. Each function is a full
//! scan, which is fine at the data volumes the dashboard sees (low thousands
//! of rows) and is the first thing to revisit if that changes.

use chrono::{DateTime, TimeDelta, Utc};

use crate::entities::{Audit, Company, CompanySummary};
use crate::enums::AuditStatus;
use crate::responses::{CompanyCount, StatsOverview, StatusCount};

/// Length of the "recent audits" window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Count audits per status. Statuses with no audits are omitted.
#[must_use]
pub fn status_breakdown(audits: &[Audit]) -> Vec<StatusCount> {
    AuditStatus::ALL
        .into_iter()
        .filter_map(|status| {
            let count = audits.iter().filter(|a| a.status == status).count() as u64;
            (count > 0).then_some(StatusCount { status, count })
        })
        .collect()
}

/// Count audits per company. Companies with no audits are omitted.
#[must_use]
pub fn company_breakdown(companies: &[Company], audits: &[Audit]) -> Vec<CompanyCount> {
    companies
        .iter()
        .filter_map(|company| {
            let count = audits.iter().filter(|a| a.company_id == company.id).count() as u64;
            (count > 0).then(|| CompanyCount {
                company: company.display_name.clone(),
                count,
            })
        })
        .collect()
}

/// Per-status counts and latest audit date for a single company.
///
/// `audits` may be the full collection; only rows for `company` are counted.
#[must_use]
pub fn company_summary(company: &Company, audits: &[Audit]) -> CompanySummary {
    let mut summary = CompanySummary {
        company: company.clone(),
        total_audits: 0,
        approved_audits: 0,
        approved_with_warning_audits: 0,
        rejected_audits: 0,
        last_audit_date: None,
    };

    for audit in audits.iter().filter(|a| a.company_id == company.id) {
        summary.total_audits += 1;
        match audit.status {
            AuditStatus::Approved => summary.approved_audits += 1,
            AuditStatus::ApprovedWithWarning => summary.approved_with_warning_audits += 1,
            AuditStatus::Rejected => summary.rejected_audits += 1,
        }
        if summary.last_audit_date.is_none_or(|d| audit.audit_date > d) {
            summary.last_audit_date = Some(audit.audit_date);
        }
    }

    summary
}

/// Summaries for every company, including those with no audits.
#[must_use]
pub fn company_summaries(companies: &[Company], audits: &[Audit]) -> Vec<CompanySummary> {
    companies
        .iter()
        .map(|company| company_summary(company, audits))
        .collect()
}

/// Audits created within the trailing window ending at `now` (inclusive).
#[must_use]
pub fn recent_count(audits: &[Audit], now: DateTime<Utc>) -> u64 {
    let cutoff = now - TimeDelta::days(RECENT_WINDOW_DAYS);
    audits.iter().filter(|a| a.created_at >= cutoff).count() as u64
}

/// Full overview: status breakdown, company breakdown, and recent count.
#[must_use]
pub fn overview(companies: &[Company], audits: &[Audit], now: DateTime<Utc>) -> StatsOverview {
    StatsOverview {
        status_breakdown: status_breakdown(audits),
        company_breakdown: company_breakdown(companies, audits),
        recent_audits: recent_count(audits, now),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn company(id: i64, name: &str, display: &str) -> Company {
        Company {
            id,
            name: name.into(),
            display_name: display.into(),
            created_at: Utc::now(),
        }
    }

    fn seed_companies() -> Vec<Company> {
        vec![
            company(1, "carol", "Carol"),
            company(2, "grand-vision", "Grand Vision"),
            company(3, "sunglass-hut", "SunglassHut"),
        ]
    }

    fn audit(id: i64, company_id: i64, status: AuditStatus, date: (i32, u32, u32)) -> Audit {
        Audit {
            id,
            company_id,
            filename: format!("{id}.pdf"),
            original_filename: "report.pdf".into(),
            file_path: format!("uploads/{id}.pdf"),
            file_size: 1024,
            file_type: "application/pdf".into(),
            audit_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            branch_number: "0042".into(),
            description: None,
            status,
            uploaded_by: Some(1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_collection_yields_empty_breakdowns() {
        let companies = seed_companies();
        let stats = overview(&companies, &[], Utc::now());
        assert!(stats.status_breakdown.is_empty());
        assert!(stats.company_breakdown.is_empty());
        assert_eq!(stats.recent_audits, 0);
        assert_eq!(stats.count_for(AuditStatus::Rejected), 0);
    }

    #[test]
    fn status_breakdown_omits_missing_statuses() {
        let audits = vec![
            audit(1, 1, AuditStatus::Rejected, (2025, 1, 10)),
            audit(2, 2, AuditStatus::Approved, (2025, 1, 11)),
            audit(3, 1, AuditStatus::Rejected, (2025, 1, 12)),
        ];
        assert_eq!(
            status_breakdown(&audits),
            vec![
                StatusCount {
                    status: AuditStatus::Approved,
                    count: 1
                },
                StatusCount {
                    status: AuditStatus::Rejected,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn company_breakdown_uses_display_names() {
        let companies = seed_companies();
        let audits = vec![
            audit(1, 1, AuditStatus::Rejected, (2025, 1, 10)),
            audit(2, 3, AuditStatus::Approved, (2025, 1, 11)),
            audit(3, 3, AuditStatus::Approved, (2025, 1, 12)),
        ];
        assert_eq!(
            company_breakdown(&companies, &audits),
            vec![
                CompanyCount {
                    company: "Carol".into(),
                    count: 1
                },
                CompanyCount {
                    company: "SunglassHut".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn summaries_cover_companies_without_audits() {
        let companies = seed_companies();
        let summaries = company_summaries(&companies, &[]);
        assert_eq!(summaries.len(), 3);
        for summary in &summaries {
            assert_eq!(summary.total_audits, 0);
            assert_eq!(summary.last_audit_date, None);
        }
    }

    #[test]
    fn summary_counts_statuses_and_tracks_latest_audit_date() {
        let carol = company(1, "carol", "Carol");
        let audits = vec![
            audit(1, 1, AuditStatus::Approved, (2025, 3, 1)),
            audit(2, 1, AuditStatus::ApprovedWithWarning, (2025, 5, 20)),
            audit(3, 1, AuditStatus::Rejected, (2025, 4, 2)),
            audit(4, 2, AuditStatus::Rejected, (2025, 12, 31)),
        ];
        let summary = company_summary(&carol, &audits);
        assert_eq!(summary.total_audits, 3);
        assert_eq!(summary.approved_audits, 1);
        assert_eq!(summary.approved_with_warning_audits, 1);
        assert_eq!(summary.rejected_audits, 1);
        assert_eq!(summary.last_audit_date, NaiveDate::from_ymd_opt(2025, 5, 20));
    }

    #[test]
    fn recent_window_is_thirty_days_inclusive() {
        let now = Utc::now();
        let mut old = audit(1, 1, AuditStatus::Approved, (2025, 1, 1));
        old.created_at = now - TimeDelta::days(31);
        let mut edge = audit(2, 1, AuditStatus::Approved, (2025, 1, 1));
        edge.created_at = now - TimeDelta::days(RECENT_WINDOW_DAYS);
        let fresh = audit(3, 1, AuditStatus::Approved, (2025, 1, 1));

        assert_eq!(recent_count(&[old, edge, fresh], now), 2);
    }

    #[test]
    fn overview_serializes_wire_shape() {
        let companies = seed_companies();
        let audits = vec![audit(1, 1, AuditStatus::Rejected, (2025, 6, 1))];
        let json = serde_json::to_value(overview(&companies, &audits, Utc::now())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status_breakdown": [{ "status": "reprovada", "count": 1 }],
                "company_breakdown": [{ "company": "Carol", "count": 1 }],
                "recent_audits": 1
            })
        );
    }
}
