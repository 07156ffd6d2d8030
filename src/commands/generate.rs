use anyhow::{bail, Result};
use tracing::info;

use khqr_api::{
    payload::{build_payload, Initiation, PaymentRequest},
    qr, verify,
};

use crate::{cli::GenerateArgs, AppCtx};

pub async fn handle(args: GenerateArgs, ctx: &AppCtx) -> Result<()> {
    let settings = ctx.settings_store.load()?;
    let profile = settings.profile()?;

    if let Some(amount) = args.amount {
        if amount < settings.min_amount || amount > settings.max_amount {
            bail!(
                "Amount must be between {} and {} {}",
                settings.min_amount,
                settings.max_amount,
                settings.currency
            );
        }
    }

    let reference = verify::new_reference();
    let request = PaymentRequest {
        amount: args.amount,
        currency: profile.currency,
        bill_reference: args.bill,
        transaction_reference: Some(reference.clone()),
        // no amount means a reusable static QR, the payer keys it in
        initiation: if args.amount.is_some() {
            Initiation::Dynamic
        } else {
            Initiation::Static
        },
    };

    let payload = build_payload(&profile, &request)?;
    info!(reference, "Generated KHQR payload");

    println!("{payload}");
    if args.data_uri {
        println!("{}", qr::render_data_uri(&payload)?);
    } else {
        println!("{}", qr::render_to_terminal(&payload)?);
    }
    info!("Verify the payment later with `khqr verify {reference}`");
    Ok(())
}
