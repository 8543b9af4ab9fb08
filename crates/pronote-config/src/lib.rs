//! # pronote-config
//!
//! Layered configuration loading for the Pronote bridge using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PRONOTE_*` prefix, `__` as separator)
//! 2. `DATABASE_URL` / `DATABASE_AUTH_TOKEN` (mapped to `database.url` / `database.auth_token`)
//! 3. Project-level `.pronote/config.toml`
//! 4. User-level `~/.config/pronote/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PRONOTE_STORE__DATA_DIR` -> `store.data_dir`,
//! `PRONOTE_PORTAL__BRIDGE_COMMAND` -> `portal.bridge_command`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pronote_config::PronoteConfig;
//!
//! let config = PronoteConfig::load_with_dotenv().expect("config");
//! if config.database.is_configured() {
//!     println!("using the database backend");
//! }
//! ```

mod database;
mod error;
mod portal;
mod store;
mod sync;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use portal::PortalConfig;
pub use store::StoreConfig;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PronoteConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl PronoteConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that can only fail later, at connection time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(scheme) = self.database.unsupported_scheme() {
            return Err(ConfigError::InvalidValue {
                field: "database.url",
                reason: format!(
                    "unsupported scheme `{scheme}://`; expected libsql://, https:// or a local path"
                ),
            });
        }
        if self.database.is_remote() && self.database.auth_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.auth_token",
                reason: "required for a remote database url".into(),
            });
        }
        Ok(())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pronote/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Conventional database variables
        figment = figment.merge(
            Env::raw()
                .only(&["DATABASE_URL", "DATABASE_AUTH_TOKEN"])
                .map(|key| {
                    if key.as_str().eq_ignore_ascii_case("DATABASE_URL") {
                        "database.url".into()
                    } else {
                        "database.auth_token".into()
                    }
                }),
        );

        // Layer 4: Prefixed environment variables (highest priority)
        figment = figment.merge(Env::prefixed("PRONOTE_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pronote").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PronoteConfig::default();
        assert!(!config.database.is_configured());
        assert!(!config.portal.is_configured());
        assert_eq!(config.sync.lesson_days_after, 7);
    }

    #[test]
    fn remote_database_needs_a_token() {
        let mut config = PronoteConfig::default();
        config.database.url = "libsql://pronote-demo.turso.io".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "database.auth_token", .. })
        ));

        config.database.auth_token = "tok".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: PronoteConfig = PronoteConfig::figment().extract()?;
            assert!(!config.database.is_configured());
            assert_eq!(config.sync.menu_days_after, 14);
            Ok(())
        });
    }
}
