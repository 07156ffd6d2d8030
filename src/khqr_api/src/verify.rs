use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SETTLEMENT_BASE_URL;
use crate::error::KhqrError;

/// Settlement status as reported by the authority. `Unknown` is a definitive
/// answer ("no such transaction"), distinct from the transport-level
/// `SettlementUnavailable` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    Pending,
    Completed,
    Failed,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub transaction_reference: String,
    pub status: SettlementStatus,
    pub verified_at: DateTime<Utc>,
    pub amount: f64,
}

/// Boundary to the external settlement authority (bank or interbank
/// switch). The codec only defines this contract; it performs no settlement
/// logic of its own. Callers own timeouts and retry policy.
#[async_trait]
pub trait SettlementAuthority {
    async fn verify(&self, reference: &str) -> Result<VerificationResult, KhqrError>;
}

fn require_reference(reference: &str) -> Result<&str, KhqrError> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(KhqrError::EmptyReference);
    }
    Ok(trimmed)
}

/// Generate a fresh transaction reference: 16 lowercase hex characters,
/// generated once per payload and never reused.
pub fn new_reference() -> String {
    let id: u64 = rand::random();
    format!("{id:016x}")
}

/// Deterministic stand-in for the settlement authority, used until a real
/// integration is wired in. Always reports the payment as completed.
pub struct SettlementStub;

#[async_trait]
impl SettlementAuthority for SettlementStub {
    async fn verify(&self, reference: &str) -> Result<VerificationResult, KhqrError> {
        let reference = require_reference(reference)?;
        debug!(reference, "settlement stub reporting completed");
        Ok(VerificationResult {
            transaction_reference: reference.to_owned(),
            status: SettlementStatus::Completed,
            verified_at: Utc::now(),
            amount: 0.0,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AuthorityResponse {
    status: SettlementStatus,
    #[serde(default)]
    amount: f64,
    verified_at: Option<DateTime<Utc>>,
}

/// HTTP client for a real settlement authority.
///
/// Transport failures (unreachable, timed out, non-2xx) surface as
/// `SettlementUnavailable`; they mean "we don't know", never "it failed".
pub struct SettlementClient {
    client: reqwest::Client,
    base_url: String,
}

impl SettlementClient {
    /// `timeout` bounds the whole verification call, connect included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KhqrError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KhqrError::SettlementUnavailable(e.to_string()))?;
        Ok(SettlementClient {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Client against the production authority endpoint.
    pub fn production(timeout: Duration) -> Result<Self, KhqrError> {
        Self::new(SETTLEMENT_BASE_URL, timeout)
    }
}

#[async_trait]
impl SettlementAuthority for SettlementClient {
    async fn verify(&self, reference: &str) -> Result<VerificationResult, KhqrError> {
        let reference = require_reference(reference)?;
        let response = self
            .client
            .post(format!("{}/v1/check_transaction", self.base_url))
            .json(&serde_json::json!({ "reference": reference }))
            .send()
            .await
            .map_err(|e| KhqrError::SettlementUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(KhqrError::SettlementUnavailable(format!(
                "authority returned {}",
                response.status()
            )));
        }
        let body: AuthorityResponse = response
            .json()
            .await
            .map_err(|e| KhqrError::SettlementUnavailable(e.to_string()))?;
        debug!(reference, status = ?body.status, "settlement authority answered");
        Ok(VerificationResult {
            transaction_reference: reference.to_owned(),
            status: body.status,
            verified_at: body.verified_at.unwrap_or_else(Utc::now),
            amount: body.amount,
        })
    }
}
