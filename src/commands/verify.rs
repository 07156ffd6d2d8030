use std::time::Duration;

use anyhow::Result;
use tracing::info;

use khqr_api::{error::KhqrError, get_authority, verify::SettlementAuthority};

use crate::{cli::VerifyArgs, AppCtx};

pub async fn handle(args: VerifyArgs, _ctx: &AppCtx) -> Result<()> {
    let authority = get_authority();
    let result = tokio::time::timeout(
        Duration::from_secs(args.timeout),
        authority.verify(&args.reference),
    )
    .await
    .map_err(|_| {
        KhqrError::SettlementUnavailable("timed out waiting for the settlement authority".into())
    })??;

    info!(
        status = ?result.status,
        amount = result.amount,
        verified_at = %result.verified_at,
        "Settlement status for {}",
        result.transaction_reference
    );
    Ok(())
}
