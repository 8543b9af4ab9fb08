//! # pronote-store
//!
//! Durable state for the Pronote bridge: one credential record and one cached
//! snapshot. Two backends implement [`StoreBackend`]:
//!
//! - [`DbStore`]: libSQL tables with singleton upserts, used when a database
//!   URL is configured (`DATABASE_URL`).
//! - [`FileStore`]: JSON documents in a local data directory otherwise.
//!
//! [`open_store`] picks the backend once per process. Callers hold the
//! returned [`Store`] and pass it down; nothing re-reads the environment.

pub mod database;
pub mod error;
pub mod file;
pub mod helpers;
mod migrations;

pub use database::DbStore;
pub use error::StoreError;
pub use file::FileStore;

use pronote_config::PronoteConfig;
use pronote_core::{BackendKind, CachedSnapshot, CredentialRecord};

/// Persistence contract for credentials and the cached snapshot.
///
/// Reads that find nothing return `Ok(None)`. Malformed stored data is an
/// error, never silently absent.
#[allow(async_fn_in_trait)]
pub trait StoreBackend {
    fn kind(&self) -> BackendKind;

    async fn credentials_get(&self) -> Result<Option<CredentialRecord>, StoreError>;

    async fn credentials_set(&self, record: &CredentialRecord) -> Result<(), StoreError>;

    /// Remove stored credentials. Succeeds when nothing is stored.
    async fn credentials_delete(&self) -> Result<(), StoreError>;

    async fn snapshot_get(&self) -> Result<Option<CachedSnapshot>, StoreError>;

    /// Replace the stored snapshot wholesale.
    async fn snapshot_set(&self, snapshot: &CachedSnapshot) -> Result<(), StoreError>;
}

/// The backend chosen at startup.
pub enum Store {
    Database(DbStore),
    File(FileStore),
}

impl Store {
    /// Which backend was selected.
    #[must_use]
    pub const fn backend_selected(&self) -> BackendKind {
        match self {
            Self::Database(_) => BackendKind::Database,
            Self::File(_) => BackendKind::File,
        }
    }
}

impl From<DbStore> for Store {
    fn from(store: DbStore) -> Self {
        Self::Database(store)
    }
}

impl From<FileStore> for Store {
    fn from(store: FileStore) -> Self {
        Self::File(store)
    }
}

impl StoreBackend for Store {
    fn kind(&self) -> BackendKind {
        self.backend_selected()
    }

    async fn credentials_get(&self) -> Result<Option<CredentialRecord>, StoreError> {
        match self {
            Self::Database(store) => store.credentials_get().await,
            Self::File(store) => store.credentials_get().await,
        }
    }

    async fn credentials_set(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        match self {
            Self::Database(store) => store.credentials_set(record).await,
            Self::File(store) => store.credentials_set(record).await,
        }
    }

    async fn credentials_delete(&self) -> Result<(), StoreError> {
        match self {
            Self::Database(store) => store.credentials_delete().await,
            Self::File(store) => store.credentials_delete().await,
        }
    }

    async fn snapshot_get(&self) -> Result<Option<CachedSnapshot>, StoreError> {
        match self {
            Self::Database(store) => store.snapshot_get().await,
            Self::File(store) => store.snapshot_get().await,
        }
    }

    async fn snapshot_set(&self, snapshot: &CachedSnapshot) -> Result<(), StoreError> {
        match self {
            Self::Database(store) => store.snapshot_set(snapshot).await,
            Self::File(store) => store.snapshot_set(snapshot).await,
        }
    }
}

/// Select and open the backend for this process.
///
/// A configured database URL selects [`DbStore`]; otherwise [`FileStore`]
/// under `store.data_dir`.
///
/// # Errors
///
/// Returns `StoreError::Configuration` if the database cannot be opened or no
/// data directory can be resolved for the file backend.
pub async fn open_store(config: &PronoteConfig) -> Result<Store, StoreError> {
    if config.database.is_configured() {
        tracing::info!(backend = "database", "store backend selected");
        return DbStore::open(&config.database).await.map(Store::from);
    }

    let dir = config.store.resolved_data_dir().ok_or_else(|| {
        StoreError::Configuration("no data directory found; set PRONOTE_STORE__DATA_DIR".into())
    })?;
    tracing::info!(backend = "file", dir = %dir.display(), "store backend selected");
    Ok(Store::File(FileStore::new(dir)))
}
