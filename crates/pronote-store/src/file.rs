//! Local JSON file backend.
//!
//! `credentials.json` and `data.json` live in one data directory. Writes
//! replace the whole document; a missing file reads as "nothing stored".

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pronote_core::{BackendKind, CachedSnapshot, CredentialRecord};
use serde_json::Value;

use crate::StoreBackend;
use crate::error::StoreError;
use crate::helpers::is_blank_payload;

const CREDENTIALS_FILE_NAME: &str = "credentials.json";
const SNAPSHOT_FILE_NAME: &str = "data.json";
const CREDENTIALS_MODE: u32 = 0o600;
const SNAPSHOT_MODE: u32 = 0o644;

/// File-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE_NAME)
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE_NAME)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }

    /// Read a document, treating a missing or blank file as absent.
    fn read_document(path: &Path) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(path) {
            Ok(raw) if is_blank_payload(&raw) => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Write to a sibling temp file, then rename over `path`. A reader sees
    /// the old document or the new one, never a torn write. `mode` applies
    /// from creation on Unix.
    fn write_document(&self, path: &Path, value: &Value, mode: u32) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let rendered = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
            what: "document",
            source,
        })?;

        // A leftover temp file would keep its old mode.
        let temp_path = path.with_extension("json.tmp");
        match fs::remove_file(&temp_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&temp_path, e)),
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let written = options.open(&temp_path).and_then(|mut file| {
            file.write_all(rendered.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::io(&temp_path, e));
        }
        fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))
    }
}

impl StoreBackend for FileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn credentials_get(&self) -> Result<Option<CredentialRecord>, StoreError> {
        let Some(raw) = Self::read_document(&self.credentials_path())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                what: "credentials",
                source,
            })
    }

    async fn credentials_set(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let path = self.credentials_path();
        let value = serde_json::to_value(record).map_err(|source| StoreError::Encode {
            what: "credentials",
            source,
        })?;
        self.write_document(&path, &value, CREDENTIALS_MODE)
    }

    async fn credentials_delete(&self) -> Result<(), StoreError> {
        let path = self.credentials_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    async fn snapshot_get(&self) -> Result<Option<CachedSnapshot>, StoreError> {
        let Some(raw) = Self::read_document(&self.snapshot_path())? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                what: "snapshot",
                source,
            })
    }

    async fn snapshot_set(&self, snapshot: &CachedSnapshot) -> Result<(), StoreError> {
        let value = serde_json::to_value(snapshot).map_err(|source| StoreError::Encode {
            what: "snapshot",
            source,
        })?;
        self.write_document(&self.snapshot_path(), &value, SNAPSHOT_MODE)
    }
}
