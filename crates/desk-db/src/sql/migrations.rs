//! Database migration runner and company seeding.
//!
//! Embeds the SQL migration file at compile time and executes it on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use super::SqlBackend;
use crate::SEED_COMPANIES;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, now};

/// Initial schema: 4 tables, 4 indexes.
const MIGRATION_001: &str = include_str!("../../migrations/001_initial.sql");

impl SqlBackend {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }

    /// Insert the fixed company set, leaving existing rows untouched.
    pub(crate) async fn seed_companies(&self) -> Result<(), DatabaseError> {
        let stamp = format_datetime(now());
        for (name, display_name) in SEED_COMPANIES {
            self.conn
                .execute(
                    "INSERT OR IGNORE INTO companies (name, display_name, created_at) VALUES (?1, ?2, ?3)",
                    libsql::params![*name, *display_name, stamp.as_str()],
                )
                .await
                .map_err(|e| DatabaseError::Migration(format!("seed company {name}: {e}")))?;
        }
        Ok(())
    }
}
