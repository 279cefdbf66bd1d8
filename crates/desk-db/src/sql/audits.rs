//! Audit queries.

use desk_core::entities::Audit;

use super::SqlBackend;
use crate::backend::AuditFilter;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_date, parse_datetime, parse_enum};
use crate::records::NewAudit;

const SELECT_COLS: &str = "id, company_id, filename, original_filename, file_path, file_size, \
     file_type, audit_date, branch_number, description, status, uploaded_by, created_at";

fn row_to_audit(row: &libsql::Row) -> Result<Audit, DatabaseError> {
    let file_size = row.get::<i64>(5)?;
    Ok(Audit {
        id: row.get::<i64>(0)?,
        company_id: row.get::<i64>(1)?,
        filename: row.get::<String>(2)?,
        original_filename: row.get::<String>(3)?,
        file_path: row.get::<String>(4)?,
        file_size: u64::try_from(file_size)
            .map_err(|_| DatabaseError::InvalidState(format!("negative file_size {file_size}")))?,
        file_type: row.get::<String>(6)?,
        audit_date: parse_date(&row.get::<String>(7)?)?,
        branch_number: row.get::<String>(8)?,
        description: get_opt_string(row, 9)?,
        status: parse_enum(&row.get::<String>(10)?)?,
        uploaded_by: row.get::<Option<i64>>(11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

impl SqlBackend {
    pub(super) async fn select_audits(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<Audit>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(company_id) = filter.company_id {
            conditions.push(format!("company_id = ?{idx}"));
            params.push(company_id.into());
            idx += 1;
        }
        if let Some(status) = filter.status {
            conditions.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(from) = filter.date_from {
            conditions.push(format!("audit_date >= ?{idx}"));
            params.push(from.to_string().into());
            idx += 1;
        }
        if let Some(to) = filter.date_to {
            conditions.push(format!("audit_date <= ?{idx}"));
            params.push(to.to_string().into());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audits{where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut rows = self
            .conn
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut audits = Vec::new();
        while let Some(row) = rows.next().await? {
            audits.push(row_to_audit(&row)?);
        }
        Ok(audits)
    }

    pub(super) async fn select_audit(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT {SELECT_COLS} FROM audits WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.map(|row| row_to_audit(&row)).transpose()
    }

    pub(super) async fn insert_audit_row(&self, audit: NewAudit) -> Result<Audit, DatabaseError> {
        let created_at = now();
        let file_size = i64::try_from(audit.file_size).map_err(|_| {
            DatabaseError::InvalidState(format!("file_size {} out of range", audit.file_size))
        })?;

        let mut rows = self
            .conn
            .query(
                "INSERT INTO audits (company_id, filename, original_filename, file_path, file_size, file_type,
                                     audit_date, branch_number, description, status, uploaded_by, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) RETURNING id",
                libsql::params![
                    audit.company_id,
                    audit.filename.as_str(),
                    audit.original_filename.as_str(),
                    audit.file_path.as_str(),
                    file_size,
                    audit.file_type.as_str(),
                    audit.audit_date.to_string(),
                    audit.branch_number.as_str(),
                    audit.description.as_deref(),
                    audit.status.as_str(),
                    audit.uploaded_by,
                    format_datetime(created_at)
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(Audit {
            id: row.get::<i64>(0)?,
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
            created_at,
        })
    }

    pub(super) async fn delete_audit_row(&self, id: i64) -> Result<Option<Audit>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("DELETE FROM audits WHERE id = ?1 RETURNING {SELECT_COLS}"),
                [id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_audit(&row)).transpose()
    }
}
