use anyhow::Context;
use magma_core::scf::ScfConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScaffoldArgs;
use crate::commands::shared::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `magma scaffold`.
pub async fn handle(args: &ScaffoldArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config: ScfConfig = read_json(&args.file)?;
    let response = match ctx.service.scaffold_project(&args.org, &config).await {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(class = ?error.class(), "scaffold run failed");
            return Err(error)
                .with_context(|| format!("failed to scaffold from {}", args.file.display()));
        }
    };
    output(&response, flags.format)
}
