use anyhow::Context;
use magma_config::MagmaConfig;
use magma_db::service::MagmaService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: MagmaService,
    pub config: MagmaConfig,
}

impl AppContext {
    /// Open the configured database, creating its directory if needed.
    pub async fn init(config: MagmaConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config.database.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let service = MagmaService::new_local(&config.database.path, config.scaffold.clone())
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        Ok(Self { service, config })
    }

    /// `--limit` if given, else the configured default.
    #[must_use]
    pub fn limit(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.config.general.default_limit)
    }
}
