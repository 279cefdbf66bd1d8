//! Company queries. Companies are seed data: read-only after open.

use desk_core::entities::Company;

use super::SqlBackend;
use crate::error::DatabaseError;
use crate::helpers::parse_datetime;

const SELECT_COLS: &str = "id, name, display_name, created_at";

fn row_to_company(row: &libsql::Row) -> Result<Company, DatabaseError> {
    Ok(Company {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        display_name: row.get::<String>(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl SqlBackend {
    pub(super) async fn select_companies(&self) -> Result<Vec<Company>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM companies ORDER BY display_name, id"),
                (),
            )
            .await?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next().await? {
            companies.push(row_to_company(&row)?);
        }
        Ok(companies)
    }

    pub(super) async fn select_company_by_id(
        &self,
        id: i64,
    ) -> Result<Option<Company>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM companies WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.map(|row| row_to_company(&row)).transpose()
    }

    pub(super) async fn select_company_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Company>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM companies WHERE name = ?1"),
                [name],
            )
            .await?;
        rows.next().await?.map(|row| row_to_company(&row)).transpose()
    }
}
