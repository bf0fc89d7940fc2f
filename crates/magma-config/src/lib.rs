//! # magma-config
//!
//! Layered configuration loading for Magma using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MAGMA_*` prefix, `__` as separator)
//! 2. Project-level `.magma/config.toml`
//! 3. User-level `~/.config/magma/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `MAGMA_DATABASE__PATH` -> `database.path`,
//! `MAGMA_SCAFFOLD__PASSING_SCORE` -> `scaffold.passing_score`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use magma_config::MagmaConfig;
//!
//! let config = MagmaConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod scaffold;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use scaffold::ScaffoldConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".magma/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MagmaConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl MagmaConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MAGMA_").split("__"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for a blank database path and
    /// [`ConfigError::InvalidValue`] for out-of-range scaffold settings or a
    /// zero `general.default_limit`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        self.scaffold.validate()?;
        self.general.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("magma").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MagmaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.path, ".magma/magma.db");
        assert_eq!(config.scaffold.passing_score, 80);
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn blank_database_path_is_not_configured() {
        let mut config = MagmaConfig::default();
        config.database.path = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { ref section }) if section == "database"
        ));
    }
}
