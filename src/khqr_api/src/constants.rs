/// Version marker carried by the payload format indicator field (tag 00).
pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";
/// Globally unique identifier of the Bakong scheme, sub-field 00 of the
/// merchant account composite.
pub const BAKONG_GUID: &str = "khqr.bakong.gov.kh";
/// Merchant category code emitted under tag 52 (general retail).
pub const MERCHANT_CATEGORY_CODE: &str = "5999";
/// Byte budget for the merchant name field (tag 59) per the KHQR profile.
pub const MERCHANT_NAME_MAX_BYTES: usize = 25;
/// Byte budget for the merchant city field (tag 60) per the KHQR profile.
pub const MERCHANT_CITY_MAX_BYTES: usize = 15;
/// Production endpoint of the national settlement authority.
pub const SETTLEMENT_BASE_URL: &str = "https://api-bakong.nbc.gov.kh";
