//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use magma_config::{ConfigError, MagmaConfig};

#[test]
fn loads_scaffold_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scaffold]
passing_score = 90
auditor_name_max_len = 40
created_by = "system:importer"
write_legacy_template = false
"#,
        )?;

        let config: MagmaConfig = Figment::from(Serialized::defaults(MagmaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.scaffold.passing_score, 90);
        assert_eq!(config.scaffold.auditor_name_max_len, 40);
        assert_eq!(config.scaffold.created_by, "system:importer");
        assert!(!config.scaffold.write_legacy_template);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[database]\npath = \"data/compliance.db\"\n")?;

        let config: MagmaConfig = Figment::from(Serialized::defaults(MagmaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "data/compliance.db");
        assert_eq!(config.scaffold.passing_score, 80);
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".magma")?;
        jail.create_file(".magma/config.toml", "[general]\ndefault_limit = 50\n")?;

        let config = MagmaConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[scaffold]\npassing_score = 150\n")?;

        let figment = Figment::from(Serialized::defaults(MagmaConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = MagmaConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
