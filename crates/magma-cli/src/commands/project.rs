use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    deleted: &'a str,
}

/// Handle `magma project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Get { id } => {
            let project = ctx.service.get_project(id).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List { org } => {
            let projects = ctx.service.list_projects(org, ctx.limit(flags.limit)).await?;
            output(&projects, flags.format)
        }
        ProjectCommands::Delete { id } => {
            ctx.service.delete_project(id).await?;
            output(&DeleteResponse { deleted: id }, flags.format)
        }
    }
}
