//! Audit registry: validated upload, filtered listing, deletion.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use desk_core::entities::{Audit, AuditView};
use desk_core::enums::AuditStatus;
use desk_core::errors::ValidationErrors;
use desk_core::responses::Page;
use desk_core::validation::{check_date, normalize_optional};

use crate::backend::AuditFilter;
use crate::error::DatabaseError;
use crate::files::UploadedFile;
use crate::records::NewAudit;
use crate::service::{DeskService, clamp_limit};

/// Raw upload form. Every field is validated before any side effect.
#[derive(Debug, Clone, Default)]
pub struct AuditUpload {
    pub company_id: String,
    pub audit_date: String,
    pub branch_number: String,
    pub description: Option<String>,
    pub status: String,
    pub file: Option<UploadedFile>,
}

/// Listing filters as they arrive in a query string. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Company internal name (e.g. `carol`).
    pub company: Option<String>,
    pub company_id: Option<i64>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn check_status(errors: &mut ValidationErrors, raw: &str) -> Option<AuditStatus> {
    match raw.trim().parse::<AuditStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(
                "status",
                "must be one of aprovada, aprovada-com-aviso, reprovada",
            );
            None
        }
    }
}

/// Parse an optional status filter, recording a failure when it is unknown.
fn status_filter(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<AuditStatus> {
    non_blank(raw).and_then(|s| check_status(errors, s))
}

impl DeskService {
    /// Validate and store an uploaded audit.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every rejected field, or a storage
    /// error if the file or the row cannot be written. A file written before a
    /// failed insert is removed again.
    pub async fn upload_audit(
        &self,
        upload: AuditUpload,
        uploader_id: Option<i64>,
    ) -> Result<AuditView, DatabaseError> {
        let mut errors = ValidationErrors::new();

        let company = match upload.company_id.trim().parse::<i64>() {
            Ok(id) => self.backend().find_company(id).await?,
            Err(_) => None,
        };
        if company.is_none() {
            errors.push("company_id", "must reference an existing company");
        }
        let audit_date = check_date(&mut errors, "audit_date", &upload.audit_date);
        let branch_number = upload.branch_number.trim().to_string();
        if branch_number.is_empty() {
            errors.push("branch_number", "is required");
        }
        let status = check_status(&mut errors, &upload.status);
        self.files().check(upload.file.as_ref(), &mut errors);

        errors.into_result()?;
        let (Some(company), Some(audit_date), Some(status), Some(file)) =
            (company, audit_date, status, upload.file)
        else {
            return Err(DatabaseError::InvalidState(
                "validated upload is missing a field".into(),
            ));
        };

        let stored = self.files().save(&file).await?;
        let record = NewAudit {
            company_id: company.id,
            filename: stored.filename.clone(),
            original_filename: file.original_name,
            file_path: stored.path.to_string_lossy().into_owned(),
            file_size: stored.size,
            file_type: file.content_type,
            audit_date,
            branch_number,
            description: normalize_optional(upload.description.as_deref()),
            status,
            uploaded_by: uploader_id,
        };

        let audit = match self.backend().insert_audit(record).await {
            Ok(audit) => audit,
            Err(error) => {
                if let Err(cleanup) = self.files().remove(&stored.path).await {
                    warn!(
                        path = %stored.path.display(),
                        error = %cleanup,
                        "failed to remove file after rejected insert"
                    );
                }
                return Err(error);
            }
        };

        info!(
            audit_id = audit.id,
            company = %company.name,
            status = %audit.status,
            "audit uploaded"
        );
        let uploaded_by_email = match audit.uploaded_by {
            Some(user_id) => self.user_emails([user_id]).await?.remove(&user_id),
            None => None,
        };
        Ok(AuditView {
            audit,
            company_name: company.display_name,
            uploaded_by_email,
        })
    }

    /// Filtered, paginated listing, newest first.
    ///
    /// An unknown company name matches nothing rather than failing.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown status or a malformed date.
    pub async fn list_audits(&self, query: &AuditQuery) -> Result<Page<AuditView>, DatabaseError> {
        let limits = self.limits();
        let limit = clamp_limit(query.limit, limits.default_audit_limit, limits.max_audit_limit);
        let offset = query.offset.unwrap_or(0);

        let mut errors = ValidationErrors::new();
        let status = status_filter(&mut errors, query.status.as_deref());
        let date_from = non_blank(query.date_from.as_deref())
            .and_then(|raw| check_date(&mut errors, "date_from", raw));
        let date_to = non_blank(query.date_to.as_deref())
            .and_then(|raw| check_date(&mut errors, "date_to", raw));
        errors.into_result()?;

        let mut company_id = query.company_id;
        if let Some(name) = non_blank(query.company.as_deref()) {
            match self.backend().find_company_by_name(name).await? {
                Some(company) if company_id.is_none_or(|id| id == company.id) => {
                    company_id = Some(company.id);
                }
                _ => {
                    debug!(company = name, "audit listing for unknown company");
                    return Ok(Page {
                        items: Vec::new(),
                        total: 0,
                        limit,
                        offset,
                    });
                }
            }
        }

        let filter = AuditFilter {
            company_id,
            status,
            date_from,
            date_to,
        };
        let matching = self.backend().list_audits(&filter).await?;
        let total = matching.len() as u64;
        let page: Vec<Audit> = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(Page {
            items: self.audit_views(page).await?,
            total,
            limit,
            offset,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` when no audit has this id.
    pub async fn get_audit(&self, id: i64) -> Result<AuditView, DatabaseError> {
        let audit = self
            .backend()
            .get_audit(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Audit", id))?;
        self.audit_views(vec![audit])
            .await?
            .pop()
            .ok_or(DatabaseError::NoResult)
    }

    /// Audits of one company, newest first, optionally narrowed by status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown company and a validation error for an
    /// unknown status.
    pub async fn company_audits(
        &self,
        company_id: i64,
        status: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<AuditView>, DatabaseError> {
        if self.backend().find_company(company_id).await?.is_none() {
            return Err(DatabaseError::not_found("Company", company_id));
        }
        let mut errors = ValidationErrors::new();
        let status = status_filter(&mut errors, status);
        errors.into_result()?;

        let limits = self.limits();
        let limit = clamp_limit(
            limit,
            limits.default_company_audit_limit,
            limits.max_audit_limit,
        );
        let filter = AuditFilter {
            company_id: Some(company_id),
            status,
            ..AuditFilter::default()
        };
        let page: Vec<Audit> = self
            .backend()
            .list_audits(&filter)
            .await?
            .into_iter()
            .skip(offset.unwrap_or(0) as usize)
            .take(limit as usize)
            .collect();
        self.audit_views(page).await
    }

    /// Remove an audit and then its stored file.
    ///
    /// A file that cannot be removed is logged and otherwise ignored: the row
    /// is already gone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no audit has this id.
    pub async fn delete_audit(&self, id: i64) -> Result<Audit, DatabaseError> {
        let audit = self
            .backend()
            .delete_audit(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Audit", id))?;

        if let Err(error) = self.files().remove(Path::new(&audit.file_path)).await {
            warn!(
                audit_id = id,
                path = %audit.file_path,
                error = %error,
                "audit deleted but its file could not be removed"
            );
        }
        info!(audit_id = id, "audit deleted");
        Ok(audit)
    }

    /// Join company display names and uploader emails onto raw audits.
    async fn audit_views(&self, audits: Vec<Audit>) -> Result<Vec<AuditView>, DatabaseError> {
        let companies: HashMap<i64, String> = self
            .backend()
            .list_companies()
            .await?
            .into_iter()
            .map(|c| (c.id, c.display_name))
            .collect();
        let emails = self
            .user_emails(audits.iter().filter_map(|a| a.uploaded_by).collect::<Vec<i64>>())
            .await?;

        Ok(audits
            .into_iter()
            .map(|audit| AuditView {
                company_name: companies
                    .get(&audit.company_id)
                    .cloned()
                    .unwrap_or_default(),
                uploaded_by_email: audit.uploaded_by.and_then(|id| emails.get(&id).cloned()),
                audit,
            })
            .collect())
    }
}
