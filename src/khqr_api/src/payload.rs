use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    BAKONG_GUID, MERCHANT_CATEGORY_CODE, MERCHANT_CITY_MAX_BYTES, MERCHANT_NAME_MAX_BYTES,
    PAYLOAD_FORMAT_INDICATOR,
};
use crate::crc::checksum16;
use crate::error::KhqrError;
use crate::merchant::{Currency, MerchantProfile};
use crate::tlv::{encode_field, parse_fields};

/// EMVCo tag numbers used by the KHQR profile. Scanners parse positionally
/// by tag, so the emission order in [`build_payload`] is part of the wire
/// contract.
mod tag {
    pub const PAYLOAD_FORMAT: &str = "00";
    pub const INITIATION: &str = "01";
    pub const MERCHANT_ACCOUNT: &str = "29";
    pub const CATEGORY_CODE: &str = "52";
    pub const CURRENCY: &str = "53";
    pub const AMOUNT: &str = "54";
    pub const COUNTRY: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";
    pub const CRC: &str = "63";

    // merchant account composite sub-tags
    pub const SUB_GUID: &str = "00";
    pub const SUB_ACCOUNT: &str = "01";
    // additional data composite sub-tags
    pub const SUB_BILL_REFERENCE: &str = "01";
    pub const SUB_TRANSACTION_REFERENCE: &str = "04";
}

/// Point-of-initiation method (tag 01).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Initiation {
    /// Reusable QR, the payer keys in the amount.
    Static,
    /// One-off QR carrying a fixed amount.
    Dynamic,
}

impl Initiation {
    pub fn code(&self) -> &'static str {
        match self {
            Initiation::Static => "11",
            Initiation::Dynamic => "12",
        }
    }
}

/// A single payment-amount request entering the assembler.
///
/// The transaction reference is supplied by the caller (generated once per
/// payload, never reused) so that payload generation itself stays
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Fixed amount; `None` for a static QR where the payer keys it in.
    pub amount: Option<f64>,
    pub currency: Currency,
    pub bill_reference: Option<String>,
    pub transaction_reference: Option<String>,
    pub initiation: Initiation,
}

/// Assemble the full KHQR payload for `request`, CRC field included.
///
/// Fields are emitted in the fixed profile order and each one is
/// length-prefixed through the TLV encoder. The trailing CRC is computed
/// over every byte emitted so far *plus* the `6304` tag/length prefix of
/// the CRC field itself, per the EMVCo rule.
pub fn build_payload(
    merchant: &MerchantProfile,
    request: &PaymentRequest,
) -> Result<String, KhqrError> {
    let amount = match request.amount {
        Some(a) if a.is_finite() && a > 0.0 => Some(a),
        Some(_) => return Err(KhqrError::InvalidAmount),
        // a dynamic QR without an amount is unscannable as a payment request
        None if request.initiation == Initiation::Dynamic => {
            return Err(KhqrError::InvalidAmount)
        }
        None => None,
    };
    if merchant.merchant_name.len() > MERCHANT_NAME_MAX_BYTES {
        return Err(KhqrError::FieldTooLong {
            tag: tag::MERCHANT_NAME,
            length: merchant.merchant_name.len(),
            max: MERCHANT_NAME_MAX_BYTES,
        });
    }
    if merchant.merchant_city.len() > MERCHANT_CITY_MAX_BYTES {
        return Err(KhqrError::FieldTooLong {
            tag: tag::MERCHANT_CITY,
            length: merchant.merchant_city.len(),
            max: MERCHANT_CITY_MAX_BYTES,
        });
    }

    let mut payload = String::new();
    payload.push_str(&encode_field(tag::PAYLOAD_FORMAT, PAYLOAD_FORMAT_INDICATOR)?);
    payload.push_str(&encode_field(tag::INITIATION, request.initiation.code())?);

    // The merchant account information is a nested composite: the sub-fields
    // are TLV-encoded first, then the whole thing is wrapped with its own
    // tag and total length.
    let mut account = encode_field(tag::SUB_GUID, BAKONG_GUID)?;
    account.push_str(&encode_field(tag::SUB_ACCOUNT, &merchant.account_number)?);
    payload.push_str(&encode_field(tag::MERCHANT_ACCOUNT, &account)?);

    payload.push_str(&encode_field(tag::CATEGORY_CODE, MERCHANT_CATEGORY_CODE)?);
    payload.push_str(&encode_field(tag::CURRENCY, request.currency.numeric_code())?);
    if let Some(amount) = amount {
        payload.push_str(&encode_field(tag::AMOUNT, &format_amount(amount))?);
    }
    payload.push_str(&encode_field(tag::COUNTRY, &merchant.country_code)?);
    payload.push_str(&encode_field(tag::MERCHANT_NAME, &merchant.merchant_name)?);
    payload.push_str(&encode_field(tag::MERCHANT_CITY, &merchant.merchant_city)?);

    let mut additional = String::new();
    if let Some(bill) = request.bill_reference.as_deref() {
        additional.push_str(&encode_field(tag::SUB_BILL_REFERENCE, bill)?);
    }
    if let Some(reference) = request.transaction_reference.as_deref() {
        additional.push_str(&encode_field(tag::SUB_TRANSACTION_REFERENCE, reference)?);
    }
    if !additional.is_empty() {
        payload.push_str(&encode_field(tag::ADDITIONAL_DATA, &additional)?);
    }

    // The CRC covers its own tag/length prefix: append "6304" first, then
    // checksum everything, then append the 4 hex digits.
    payload.push_str(tag::CRC);
    payload.push_str("04");
    let crc = checksum16(payload.as_bytes());
    payload.push_str(&crc);

    debug!(bytes = payload.len(), %crc, "assembled KHQR payload");
    Ok(payload)
}

/// Amounts always carry exactly 2 fraction digits, decimal point kept.
fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Fields recovered from a KHQR payload by [`parse_payload`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedPayload {
    pub format_indicator: String,
    pub initiation: Option<Initiation>,
    pub scheme_guid: Option<String>,
    pub account_number: Option<String>,
    pub category_code: Option<String>,
    pub currency: Option<Currency>,
    pub amount: Option<f64>,
    pub country_code: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_city: Option<String>,
    pub bill_reference: Option<String>,
    pub transaction_reference: Option<String>,
    pub crc: String,
}

/// Re-parse a payload field-by-field and validate its trailing CRC.
///
/// The CRC is recomputed over the body plus the `6304` prefix, exactly as
/// the assembler produced it; any mismatch means the payload was damaged in
/// transit and is rejected outright.
pub fn parse_payload(payload: &str) -> Result<DecodedPayload, KhqrError> {
    if payload.len() < 8 || !payload.is_char_boundary(payload.len() - 8) {
        return Err(KhqrError::InvalidPayload(
            "too short or damaged where the CRC field should start".to_string(),
        ));
    }
    let (body, crc_field) = payload.split_at(payload.len() - 8);
    // byte comparison: a damaged tail may split a multi-byte character at
    // this offset, which must parse as an error, not panic
    if &crc_field.as_bytes()[..4] != b"6304" {
        return Err(KhqrError::InvalidPayload(
            "payload does not end with a 4-digit CRC field".to_string(),
        ));
    }
    let found = &crc_field[4..];
    let expected = checksum16(payload[..payload.len() - 4].as_bytes());
    if found != expected {
        return Err(KhqrError::InvalidPayload(format!(
            "CRC mismatch: computed {expected}, found {found}"
        )));
    }

    let mut decoded = DecodedPayload {
        crc: found.to_owned(),
        ..Default::default()
    };
    for field in parse_fields(body)? {
        match field.tag.as_str() {
            tag::PAYLOAD_FORMAT => decoded.format_indicator = field.value,
            tag::INITIATION => {
                decoded.initiation = match field.value.as_str() {
                    "11" => Some(Initiation::Static),
                    "12" => Some(Initiation::Dynamic),
                    _ => None,
                }
            }
            tag::MERCHANT_ACCOUNT => {
                for sub in parse_fields(&field.value)? {
                    match sub.tag.as_str() {
                        tag::SUB_GUID => decoded.scheme_guid = Some(sub.value),
                        tag::SUB_ACCOUNT => decoded.account_number = Some(sub.value),
                        _ => {}
                    }
                }
            }
            tag::CATEGORY_CODE => decoded.category_code = Some(field.value),
            tag::CURRENCY => decoded.currency = Currency::from_numeric(&field.value).ok(),
            tag::AMOUNT => decoded.amount = field.value.parse().ok(),
            tag::COUNTRY => decoded.country_code = Some(field.value),
            tag::MERCHANT_NAME => decoded.merchant_name = Some(field.value),
            tag::MERCHANT_CITY => decoded.merchant_city = Some(field.value),
            tag::ADDITIONAL_DATA => {
                for sub in parse_fields(&field.value)? {
                    match sub.tag.as_str() {
                        tag::SUB_BILL_REFERENCE => decoded.bill_reference = Some(sub.value),
                        tag::SUB_TRANSACTION_REFERENCE => {
                            decoded.transaction_reference = Some(sub.value)
                        }
                        _ => {}
                    }
                }
            }
            // other tags are legal under the profile but carry nothing we use
            _ => {}
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlv;

    fn rotha_nang() -> MerchantProfile {
        MerchantProfile {
            merchant_id: "1234567890".to_string(),
            merchant_name: "ROTHA NANG".to_string(),
            merchant_city: "Phnom Penh".to_string(),
            country_code: "KH".to_string(),
            currency: Currency::Usd,
            account_number: "0123456789".to_string(),
        }
    }

    fn dynamic_usd(amount: f64) -> PaymentRequest {
        PaymentRequest {
            amount: Some(amount),
            currency: Currency::Usd,
            bill_reference: None,
            transaction_reference: Some("cafebabe00112233".to_string()),
            initiation: Initiation::Dynamic,
        }
    }

    #[test]
    fn test_scenario_four_fifty_usd() {
        let payload = build_payload(&rotha_nang(), &dynamic_usd(4.50)).unwrap();

        assert!(payload.starts_with("000201"));
        assert!(payload.contains("5303840"));
        assert!(payload.contains("54044.50"));
        assert!(payload.contains("5910ROTHA NANG"));
        assert!(payload.contains("6010Phnom Penh"));
        assert!(payload.contains("5802KH"));
    }

    #[test]
    fn test_crc_covers_its_own_prefix() {
        let payload = build_payload(&rotha_nang(), &dynamic_usd(4.50)).unwrap();
        let crc = &payload[payload.len() - 4..];
        assert_eq!(&payload[payload.len() - 8..payload.len() - 4], "6304");
        // the checksum input ends right after the "6304" marker
        assert_eq!(crc, checksum16(payload[..payload.len() - 4].as_bytes()));
    }

    #[test]
    fn test_field_order_invariant() {
        let payload = build_payload(&rotha_nang(), &dynamic_usd(12.00)).unwrap();
        assert_eq!(&payload[..4], "0002");
        assert_eq!(&payload[payload.len() - 8..payload.len() - 6], "63");
        let crc = &payload[payload.len() - 4..];
        assert!(crc.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let merchant = rotha_nang();
        let request = dynamic_usd(4.50);
        assert_eq!(
            build_payload(&merchant, &request).unwrap(),
            build_payload(&merchant, &request).unwrap()
        );
    }

    #[test]
    fn test_every_length_prefix_is_exact() {
        let mut request = dynamic_usd(99.90);
        request.bill_reference = Some("INV-2024-001".to_string());
        let payload = build_payload(&rotha_nang(), &request).unwrap();
        // parse_fields errors out if any length prefix disagrees with the
        // bytes that follow it, and must consume the payload exactly
        let fields = tlv::parse_fields(&payload).unwrap();
        let total: usize = fields.iter().map(|f| 4 + f.value.len()).sum();
        assert_eq!(total, payload.len());
    }

    #[test]
    fn test_round_trip_reproduces_input() {
        let mut request = dynamic_usd(4.50);
        request.bill_reference = Some("ORDER-42".to_string());
        let merchant = rotha_nang();
        let payload = build_payload(&merchant, &request).unwrap();

        let decoded = parse_payload(&payload).unwrap();
        assert_eq!(decoded.format_indicator, "01");
        assert_eq!(decoded.initiation, Some(Initiation::Dynamic));
        assert_eq!(decoded.scheme_guid.as_deref(), Some("khqr.bakong.gov.kh"));
        assert_eq!(decoded.account_number.as_deref(), Some("0123456789"));
        assert_eq!(decoded.currency, Some(Currency::Usd));
        assert_eq!(decoded.amount, Some(4.50));
        assert_eq!(decoded.country_code.as_deref(), Some("KH"));
        assert_eq!(decoded.merchant_name.as_deref(), Some("ROTHA NANG"));
        assert_eq!(decoded.merchant_city.as_deref(), Some("Phnom Penh"));
        assert_eq!(decoded.bill_reference.as_deref(), Some("ORDER-42"));
        assert_eq!(
            decoded.transaction_reference.as_deref(),
            Some("cafebabe00112233")
        );
    }

    #[test]
    fn test_non_positive_amounts_fail() {
        let merchant = rotha_nang();
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = build_payload(&merchant, &dynamic_usd(bad)).unwrap_err();
            assert!(matches!(err, KhqrError::InvalidAmount), "amount {bad}");
        }
    }

    #[test]
    fn test_dynamic_without_amount_fails() {
        let mut request = dynamic_usd(1.0);
        request.amount = None;
        let err = build_payload(&rotha_nang(), &request).unwrap_err();
        assert!(matches!(err, KhqrError::InvalidAmount));
    }

    #[test]
    fn test_static_payload_omits_amount() {
        let request = PaymentRequest {
            amount: None,
            currency: Currency::Khr,
            bill_reference: None,
            transaction_reference: None,
            initiation: Initiation::Static,
        };
        let payload = build_payload(&rotha_nang(), &request).unwrap();
        assert!(payload.contains("010211"));
        assert!(payload.contains("5303116"));
        let fields = tlv::parse_fields(&payload).unwrap();
        assert!(fields.iter().all(|f| f.tag != "54"));
        let decoded = parse_payload(&payload).unwrap();
        assert_eq!(decoded.initiation, Some(Initiation::Static));
        assert_eq!(decoded.amount, None);
        assert_eq!(decoded.bill_reference, None);
    }

    #[test]
    fn test_merchant_name_byte_budget() {
        let mut merchant = rotha_nang();
        merchant.merchant_name = "A".repeat(25);
        assert!(build_payload(&merchant, &dynamic_usd(1.0)).is_ok());

        merchant.merchant_name = "A".repeat(26);
        let err = build_payload(&merchant, &dynamic_usd(1.0)).unwrap_err();
        assert!(matches!(
            err,
            KhqrError::FieldTooLong {
                tag: "59",
                length: 26,
                max: 25,
            }
        ));
    }

    #[test]
    fn test_merchant_city_byte_budget() {
        let mut merchant = rotha_nang();
        merchant.merchant_city = "B".repeat(16);
        let err = build_payload(&merchant, &dynamic_usd(1.0)).unwrap_err();
        assert!(matches!(err, KhqrError::FieldTooLong { tag: "60", .. }));
    }

    #[test]
    fn test_oversized_bill_reference_fails_not_truncates() {
        let mut request = dynamic_usd(1.0);
        request.bill_reference = Some("x".repeat(100));
        let err = build_payload(&rotha_nang(), &request).unwrap_err();
        assert!(matches!(err, KhqrError::FieldTooLong { tag: "01", .. }));
    }

    #[test]
    fn test_amount_always_has_two_fraction_digits() {
        let payload = build_payload(&rotha_nang(), &dynamic_usd(7.0)).unwrap();
        assert!(payload.contains("54047.00"));
        let payload = build_payload(&rotha_nang(), &dynamic_usd(1234.5)).unwrap();
        assert!(payload.contains("54071234.50"));
    }

    #[test]
    fn test_parse_rejects_corrupted_crc() {
        let mut payload = build_payload(&rotha_nang(), &dynamic_usd(4.50)).unwrap();
        // flip the last hex digit
        let last = payload.pop().unwrap();
        payload.push(if last == '0' { '1' } else { '0' });
        let err = parse_payload(&payload).unwrap_err();
        assert!(matches!(err, KhqrError::InvalidPayload(_)));
    }

    #[test]
    fn test_parse_rejects_multibyte_damage_in_crc_field() {
        // last 8 bytes hold multi-byte characters straddling the CRC
        // marker offset; must report damage, not panic
        for mangled in ["0002€€xx", "000201€€91xx", "€€€€"] {
            let err = parse_payload(mangled).unwrap_err();
            assert!(matches!(err, KhqrError::InvalidPayload(_)), "{mangled}");
        }
    }

    #[test]
    fn test_parse_rejects_truncated_payload() {
        assert!(matches!(
            parse_payload("6304"),
            Err(KhqrError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_payload(""),
            Err(KhqrError::InvalidPayload(_))
        ));
    }
}
