use folio_config::FolioConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: FolioConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Migrate(args) => commands::migrate::handle(&args, config, flags).await,
        Commands::Check => commands::check::handle(&config, flags).await,
        Commands::Schema => commands::schema::handle(flags),
    }
}
