//! Relational backend configuration.
//!
//! The presence of `url` is what selects the database backend over local files.

use serde::{Deserialize, Serialize};

const REMOTE_SCHEMES: [&str; 5] = ["libsql", "https", "http", "wss", "ws"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection string. `libsql://` / `https://` URLs open a remote database,
    /// anything else is a local database path (`file:` prefix optional).
    #[serde(default)]
    pub url: String,

    /// Auth token for remote databases.
    #[serde(default)]
    pub auth_token: String,
}

impl DatabaseConfig {
    /// Whether a connection string is present at all.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Whether the URL points at a remote server.
    pub fn is_remote(&self) -> bool {
        self.scheme()
            .is_some_and(|scheme| REMOTE_SCHEMES.contains(&scheme))
    }

    /// Scheme of a `scheme://` URL, if it has one. `file:` paths have none.
    pub fn scheme(&self) -> Option<&str> {
        self.url.trim().split_once("://").map(|(scheme, _)| scheme)
    }

    /// A URL naming a scheme libSQL cannot open, such as `postgres://`.
    pub fn unsupported_scheme(&self) -> Option<&str> {
        self.scheme()
            .filter(|scheme| !REMOTE_SCHEMES.contains(scheme) && *scheme != "file")
    }

    /// Local database path with an optional `file:` prefix removed.
    pub fn local_path(&self) -> &str {
        let url = self.url.trim();
        url.strip_prefix("file:").unwrap_or(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!DatabaseConfig::default().is_configured());
    }

    #[test]
    fn whitespace_url_is_not_configured() {
        let config = DatabaseConfig {
            url: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn remote_detection() {
        let config = DatabaseConfig {
            url: "libsql://pronote-demo.turso.io".into(),
            auth_token: "tok".into(),
        };
        assert!(config.is_configured());
        assert!(config.is_remote());
    }

    #[test]
    fn postgres_url_is_unsupported() {
        let config = DatabaseConfig {
            url: "postgres://user:pw@ep-demo.neon.tech/pronote".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        assert_eq!(config.unsupported_scheme(), Some("postgres"));

        let local = DatabaseConfig {
            url: "file:/var/lib/pronote/state.db".into(),
            ..Default::default()
        };
        assert_eq!(local.unsupported_scheme(), None);
    }

    #[test]
    fn local_path_strips_file_prefix() {
        let config = DatabaseConfig {
            url: "file:/var/lib/pronote/state.db".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        assert_eq!(config.local_path(), "/var/lib/pronote/state.db");
    }
}
