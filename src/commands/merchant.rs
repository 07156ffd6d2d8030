use anyhow::Result;

use crate::AppCtx;

pub async fn handle(ctx: &AppCtx) -> Result<()> {
    let settings = ctx.settings_store.load()?;
    let profile = settings.profile()?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
