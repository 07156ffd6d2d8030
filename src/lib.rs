use anyhow::Result;

pub mod api;
pub mod cli;
mod commands;
pub mod settings;

use cli::{Cli, Commands};
use settings::{FileSettingsStore, SettingsStore};

pub struct AppCtx {
    pub settings_store: Box<dyn SettingsStore>,
}

#[cfg(not(tarpaulin_include))]
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = AppCtx {
        settings_store: Box::new(FileSettingsStore::new()?),
    };

    match cli.command {
        Commands::Config(args) => commands::config::handle(args, &ctx).await,
        Commands::Generate(args) => commands::generate::handle(args, &ctx).await,
        Commands::Verify(args) => commands::verify::handle(args, &ctx).await,
        Commands::MerchantInfo => commands::merchant::handle(&ctx).await,
        Commands::Serve(args) => commands::serve::handle(args, &ctx).await,
    }
}
