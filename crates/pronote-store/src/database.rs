//! libSQL backend.
//!
//! One row per table, keyed by `id = 1`. Every write is an
//! `INSERT ... ON CONFLICT (id) DO UPDATE`, so repeated writes never add rows.

use chrono::Utc;
use libsql::Builder;
use pronote_config::DatabaseConfig;
use pronote_core::{BackendKind, CachedSnapshot, CredentialRecord};

use crate::StoreBackend;
use crate::error::StoreError;
use crate::helpers::{export_timestamp, is_blank_payload};

/// Relational store over a local or remote libSQL database.
pub struct DbStore {
    #[allow(dead_code)]
    db: libsql::Database,
    pub(crate) conn: libsql::Connection,
}

impl DbStore {
    /// Open the database named by `config` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the URL is missing, a remote URL
    /// has no auth token, or the database cannot be opened or migrated.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::Configuration(
                "database backend selected but no database URL is set".into(),
            ));
        }

        let opened = if config.is_remote() {
            if config.auth_token.is_empty() {
                return Err(StoreError::Configuration(
                    "remote database URL requires DATABASE_AUTH_TOKEN".into(),
                ));
            }
            Builder::new_remote(config.url.trim().to_string(), config.auth_token.clone())
                .build()
                .await
        } else {
            Builder::new_local(config.local_path()).build().await
        };
        let db = opened
            .map_err(|e| StoreError::Configuration(format!("failed to open database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Configuration(format!("failed to connect: {e}")))?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        tracing::debug!(remote = config.is_remote(), "database store opened");
        Ok(store)
    }

    /// Open a local database file directly (tests and tooling).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        Self::open(&DatabaseConfig {
            url: path.to_string(),
            auth_token: String::new(),
        })
        .await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    async fn count_rows(&self, table: &str) -> Result<i64, StoreError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }

    /// Number of stored credential rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn credential_rows(&self) -> Result<i64, StoreError> {
        self.count_rows("pronote_credentials").await
    }

    /// Number of stored snapshot rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn snapshot_rows(&self) -> Result<i64, StoreError> {
        self.count_rows("pronote_cache").await
    }
}

impl StoreBackend for DbStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Database
    }

    async fn credentials_get(&self) -> Result<Option<CredentialRecord>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT url, username, password, uuid FROM pronote_credentials WHERE id = 1",
                (),
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        // NULL columns read as empty so incomplete rows are reported per field.
        Ok(Some(CredentialRecord {
            url: row.get::<Option<String>>(0)?.unwrap_or_default(),
            username: row.get::<Option<String>>(1)?.unwrap_or_default(),
            password: row.get::<Option<String>>(2)?.unwrap_or_default(),
            device_uuid: row.get::<Option<String>>(3)?.unwrap_or_default(),
        }))
    }

    async fn credentials_set(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO pronote_credentials (id, url, username, password, uuid, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                     url = excluded.url,
                     username = excluded.username,
                     password = excluded.password,
                     uuid = excluded.uuid,
                     updated_at = excluded.updated_at",
                libsql::params![
                    record.url.as_str(),
                    record.username.as_str(),
                    record.password.as_str(),
                    record.device_uuid.as_str(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn credentials_delete(&self) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM pronote_credentials WHERE id = 1", ())
            .await?;
        Ok(())
    }

    async fn snapshot_get(&self) -> Result<Option<CachedSnapshot>, StoreError> {
        let mut rows = self
            .conn
            .query("SELECT data FROM pronote_cache WHERE id = 1", ())
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let raw = row.get::<Option<String>>(0)?.unwrap_or_default();
        if is_blank_payload(&raw) {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                what: "snapshot",
                source,
            })
    }

    async fn snapshot_set(&self, snapshot: &CachedSnapshot) -> Result<(), StoreError> {
        let payload = serde_json::to_value(snapshot).map_err(|source| StoreError::Encode {
            what: "snapshot",
            source,
        })?;
        let exported_at = export_timestamp(&payload);

        self.conn
            .execute(
                "INSERT INTO pronote_cache (id, data, export_date, updated_at)
                 VALUES (1, ?1, ?2, ?3)
                 ON CONFLICT (id) DO UPDATE SET
                     data = excluded.data,
                     export_date = excluded.export_date,
                     updated_at = excluded.updated_at",
                libsql::params![
                    payload.to_string(),
                    exported_at.to_rfc3339(),
                    Utc::now().to_rfc3339(),
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> DbStore {
        DbStore::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_creates_schema() {
        let store = test_store().await;
        for table in ["pronote_credentials", "pronote_cache"] {
            let mut rows = store
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn null_columns_read_as_empty() {
        let store = test_store().await;
        store
            .conn()
            .execute(
                "INSERT INTO pronote_credentials (id, url, username, updated_at)
                 VALUES (1, 'https://x', 'demo', '2026-10-19 07:30:00')",
                (),
            )
            .await
            .unwrap();

        let record = store.credentials_get().await.unwrap().unwrap();
        assert_eq!(record.missing_field(), Some("password"));
    }

    #[tokio::test]
    async fn export_date_column_tracks_payload() {
        use chrono::TimeZone;
        use pronote_core::entities::StudentInfo;

        let store = test_store().await;
        let exported_at = Utc.with_ymd_and_hms(2026, 10, 19, 7, 30, 0).unwrap();
        store
            .snapshot_set(&CachedSnapshot::empty(exported_at, StudentInfo::default()))
            .await
            .unwrap();

        let mut rows = store
            .conn()
            .query("SELECT export_date FROM pronote_cache WHERE id = 1", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), exported_at.to_rfc3339());
    }

    #[tokio::test]
    async fn empty_object_payload_reads_as_absent() {
        let store = test_store().await;
        store
            .conn()
            .execute(
                "INSERT INTO pronote_cache (id, data, export_date, updated_at)
                 VALUES (1, '{}', '2026-10-19T07:30:00Z', '2026-10-19T07:30:00Z')",
                (),
            )
            .await
            .unwrap();
        assert!(store.snapshot_get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_payload_is_a_read_error() {
        let store = test_store().await;
        store
            .conn()
            .execute(
                "INSERT INTO pronote_cache (id, data, export_date, updated_at)
                 VALUES (1, '{\"eleve\": ', '2026-10-19T07:30:00Z', '2026-10-19T07:30:00Z')",
                (),
            )
            .await
            .unwrap();
        let err = store.snapshot_get().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { what: "snapshot", .. }));
    }

    #[tokio::test]
    async fn remote_url_without_token_is_configuration_error() {
        let result = DbStore::open(&DatabaseConfig {
            url: "libsql://pronote-demo.turso.io".into(),
            auth_token: String::new(),
        })
        .await;
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn missing_url_is_configuration_error() {
        let result = DbStore::open(&DatabaseConfig::default()).await;
        assert!(result.is_err_and(|e| e.is_configuration()));
    }
}
