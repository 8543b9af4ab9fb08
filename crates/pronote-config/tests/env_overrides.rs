//! Environment-driven backend selection and overrides.
//!
//! Uses figment::Jail for sandboxed env var manipulation.

use figment::Jail;
use pronote_config::{ConfigError, PronoteConfig};

#[test]
fn database_url_selects_database_section() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "libsql://pronote-demo.turso.io");
        jail.set_env("DATABASE_AUTH_TOKEN", "db-token");

        let config = PronoteConfig::load().expect("config loads");
        assert!(config.database.is_configured());
        assert!(config.database.is_remote());
        assert_eq!(config.database.auth_token, "db-token");
        Ok(())
    });
}

#[test]
fn no_database_url_leaves_database_unconfigured() {
    Jail::expect_with(|_jail| {
        let config = PronoteConfig::load().expect("config loads");
        assert!(!config.database.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_conventional_database_url() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "file:/tmp/from-conventional.db");
        jail.set_env("PRONOTE_DATABASE__URL", "file:/tmp/from-prefixed.db");

        let config = PronoteConfig::load().expect("config loads");
        assert_eq!(config.database.local_path(), "/tmp/from-prefixed.db");
        Ok(())
    });
}

#[test]
fn sync_windows_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("PRONOTE_SYNC__LESSON_DAYS_AFTER", "3");
        jail.set_env("PRONOTE_SYNC__UNREAD_DISCUSSIONS_ONLY", "true");

        let config = PronoteConfig::load().expect("config loads");
        assert_eq!(config.sync.lesson_days_after, 3);
        assert!(config.sync.unread_discussions_only);
        assert_eq!(config.sync.homework_days_after, 30);
        Ok(())
    });
}

#[test]
fn postgres_database_url_is_rejected_at_load() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "postgres://user:pw@ep-demo.neon.tech/pronote");

        let err = PronoteConfig::load().expect_err("postgres urls are not supported");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "database.url", ref reason } if reason.contains("postgres")
        ));
        Ok(())
    });
}
