use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
        Commands::Catalog { action } => commands::catalog::handle(&action, ctx, flags).await,
        Commands::Scaffold(args) => commands::scaffold::handle(&args, ctx, flags).await,
        Commands::Seed(args) => commands::seed::handle(&args, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Tree(args) => commands::tree::handle(&args, ctx, flags).await,
        Commands::Fingerprint(args) => commands::fingerprint::handle(&args, flags),
    }
}
