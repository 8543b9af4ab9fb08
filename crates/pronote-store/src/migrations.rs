//! Database migration runner.
//!
//! Embeds the SQL migration file at compile time and executes it on open.
//! All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::database::DbStore;
use crate::error::StoreError;

/// Singleton credential and cache tables.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl DbStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Configuration(format!("migration 001_initial: {e}")))?;
        Ok(())
    }
}
