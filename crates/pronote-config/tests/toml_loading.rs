//! Integration tests for TOML configuration loading.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pronote_config::PronoteConfig;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "file:./state.db"

[store]
data_dir = "./pronote-data"

[portal]
bridge_command = "python3"
bridge_args = ["helper.py"]

[sync]
menu_days_after = 21
"#,
        )?;

        let config: PronoteConfig = Figment::from(Serialized::defaults(PronoteConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.local_path(), "./state.db");
        assert_eq!(config.store.data_dir, "./pronote-data");
        assert_eq!(config.portal.bridge_command, "python3");
        assert_eq!(config.portal.bridge_args, vec!["helper.py".to_string()]);
        assert_eq!(config.sync.menu_days_after, 21);
        assert_eq!(config.sync.homework_days_before, 7);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
data_dir = "from-toml"
"#,
        )?;
        jail.set_env("PRONOTE_STORE__DATA_DIR", "from-env");

        let config: PronoteConfig = Figment::from(Serialized::defaults(PronoteConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PRONOTE_").split("__"))
            .extract()?;

        assert_eq!(config.store.data_dir, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pronote")?;
        jail.create_file(
            ".pronote/config.toml",
            r#"
[portal]
fixture_path = "account.json"
"#,
        )?;

        let config = PronoteConfig::load().expect("config loads");
        assert!(config.portal.has_fixture());
        Ok(())
    });
}
