//! Local file backend configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding `credentials.json` and `data.json`.
    /// Empty means the platform data directory (`~/.local/share/pronote` on Linux).
    #[serde(default)]
    pub data_dir: String,
}

impl StoreConfig {
    /// Resolved data directory, or `None` when no default location exists.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.is_empty() {
            dirs::data_dir().map(|p| p.join("pronote"))
        } else {
            Some(PathBuf::from(&self.data_dir))
        }
    }
}
