use anyhow::Result;
use tracing::info;

use crate::{api, cli::ServeArgs, AppCtx};

pub async fn handle(args: ServeArgs, ctx: &AppCtx) -> Result<()> {
    let settings = ctx.settings_store.load()?;
    info!("Starting KHQR API server on {}", args.bind);
    api::server::start_server(&args.bind, settings).await?;
    Ok(())
}
