//! User queries.

use desk_core::entities::User;

use super::SqlBackend;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, is_unique_violation, now, parse_datetime, parse_enum};
use crate::records::NewUser;

const SELECT_COLS: &str = "id, email, password_hash, role, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        email: row.get::<String>(1)?,
        password_hash: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SqlBackend {
    pub(super) async fn select_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        rows.next().await?.map(|row| row_to_user(&row)).transpose()
    }

    pub(super) async fn select_user_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.map(|row| row_to_user(&row)).transpose()
    }

    pub(super) async fn insert_user_row(&self, user: NewUser) -> Result<User, DatabaseError> {
        let created_at = now();
        let stamp = format_datetime(created_at);
        let mut rows = self
            .conn
            .query(
                "INSERT INTO users (email, password_hash, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                libsql::params![
                    user.email.as_str(),
                    user.password_hash.as_str(),
                    user.role.as_str(),
                    stamp.as_str(),
                    stamp.as_str()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::Conflict(format!("user '{}' already exists", user.email))
                } else {
                    DatabaseError::LibSql(e)
                }
            })?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(User {
            id: row.get::<i64>(0)?,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at,
            updated_at: created_at,
        })
    }

    pub(super) async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DatabaseError> {
        let stamp = format_datetime(now());
        let changed = self
            .conn
            .execute(
                "UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![password_hash, stamp.as_str(), user_id],
            )
            .await?;
        Ok(changed > 0)
    }
}
