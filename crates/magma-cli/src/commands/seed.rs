use anyhow::Context;
use magma_core::seed::DocumentationBundle;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedArgs;
use crate::commands::shared::read_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `magma seed`.
pub async fn handle(args: &SeedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let bundle: DocumentationBundle = read_json(&args.file)?;
    let stats = ctx
        .service
        .seed_default_documentation(&args.org, &args.project, &bundle)
        .await
        .with_context(|| format!("failed to seed project {}", args.project))?;
    output(&stats, flags.format)
}
