use anyhow::{Context, Result};
use khqr_api::merchant::Currency;
use tracing::info;

use crate::{cli::ConfigArgs, AppCtx};

pub async fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    let mut settings = ctx.settings_store.load()?;

    if let Some(name) = args.merchant_name {
        settings.merchant_name = name;
    }
    if let Some(city) = args.merchant_city {
        settings.merchant_city = city;
    }
    if let Some(account) = args.account_number {
        settings.account_number = account;
    }
    if let Some(currency) = args.currency {
        let parsed: Currency = currency
            .parse()
            .with_context(|| format!("Unsupported currency: {currency}"))?;
        settings.currency = parsed.to_string();
    }

    // fail now rather than at generation time
    settings.profile()?;

    ctx.settings_store.save(&settings)?;
    info!("Configuration saved successfully ✅");
    Ok(())
}
