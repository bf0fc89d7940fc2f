use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `magma tree`.
pub async fn handle(args: &TreeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Surface a missing project as an error rather than an empty forest.
    ctx.service.get_project(&args.project).await?;
    let tree = ctx.service.document_tree(&args.project).await?;
    output(&tree, flags.format)
}
