use anyhow::Result;
use clap::Parser;

use khqr_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let cli = khqr_cli::cli::Cli::parse();
    khqr_cli::run(cli).await?;
    Ok(())
}
