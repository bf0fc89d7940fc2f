use anyhow::Context;
use magma_config::MagmaConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply flag overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<MagmaConfig> {
    let mut config = MagmaConfig::load_with_dotenv().context("failed to load magma config")?;
    apply_overrides(&mut config, flags);
    config.validate().context("invalid magma config")?;
    Ok(config)
}

fn apply_overrides(config: &mut MagmaConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
}

#[cfg(test)]
mod tests {
    use super::apply_overrides;
    use crate::cli::{GlobalFlags, OutputFormat};
    use magma_config::MagmaConfig;

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
            db: db.map(ToString::to_string),
        }
    }

    #[test]
    fn db_flag_wins_over_config() {
        let mut config = MagmaConfig::default();
        apply_overrides(&mut config, &flags(Some(":memory:")));
        assert_eq!(config.database.path, ":memory:");
    }

    #[test]
    fn config_path_kept_without_flag() {
        let mut config = MagmaConfig::default();
        apply_overrides(&mut config, &flags(None));
        assert_eq!(config.database.path, ".magma/magma.db");
    }
}
