use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateParams {
    pub amount: f64,
    pub bill_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub payload: String,
    /// PNG rendering of the payload as a base64 data URI.
    pub qr_code: String,
    pub amount: f64,
    pub merchant_name: String,
    pub account_number: String,
    /// Correlates this payload with later verification calls.
    pub transaction_reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MerchantInfoResponse {
    pub merchant_name: String,
    pub merchant_city: String,
    pub country_code: String,
    pub currency_code: String,
    pub supported_currencies: Vec<String>,
    pub max_amount: f64,
    pub min_amount: f64,
}
