use desk_config::DeskConfig;

use crate::cli::Commands;

pub mod create_admin;
pub mod seed;
pub mod serve;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: DeskConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::CreateAdmin(args) => create_admin::handle(&args, config).await,
        Commands::Seed => seed::handle(config).await,
    }
}
