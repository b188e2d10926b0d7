use anyhow::Result;
use clap::Parser;

use artdepot::cli::{Cli, Commands};
use artdepot::commands;
use artdepot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(root) = cli.root {
        config.depot.root = root;
    }

    match cli.command {
        Commands::Init { force } => commands::init::run(&config, force).await,
        Commands::Project(command) => commands::project::run(&config, command).await,
        Commands::Asset(command) => commands::asset::run(&config, command).await,
        Commands::Open {
            project,
            asset,
            asset_type,
        } => commands::open::run(&config, project, asset, asset_type).await,
        Commands::Watch { project, interval } => {
            commands::watch::run(&config, project, interval).await
        }
        Commands::Config => commands::config::run(&config).await,
        Commands::Version => commands::version::run(),
    }
}
