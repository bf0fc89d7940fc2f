use thiserror::Error;

/// Failure to build a usable [`crate::MagmaConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `MAGMA_*` variable could not be parsed into the config shape.
    #[error("failed to load magma config: {0}")]
    Figment(#[from] figment::Error),

    /// A section that must be set resolved to a blank value.
    #[error("[{section}] is not configured")]
    NotConfigured { section: String },

    /// A value parsed but is outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
