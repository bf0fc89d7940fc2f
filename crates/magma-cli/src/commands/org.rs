use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `magma org`.
pub async fn handle(action: &OrgCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        OrgCommands::Create { name } => {
            let org = ctx.service.create_organization(name).await?;
            output(&org, flags.format)
        }
        OrgCommands::Get { id } => {
            let org = ctx.service.get_organization(id).await?;
            output(&org, flags.format)
        }
        OrgCommands::List => {
            let orgs = ctx.service.list_organizations().await?;
            output(&orgs, flags.format)
        }
    }
}
