use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KhqrError;

/// Transaction currency supported by the KHQR profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Khr,
}

impl Currency {
    /// ISO 4217 numeric code, as emitted under tag 53.
    pub fn numeric_code(&self) -> &'static str {
        match self {
            Currency::Usd => "840",
            Currency::Khr => "116",
        }
    }

    pub fn from_numeric(code: &str) -> Result<Self, KhqrError> {
        match code {
            "840" => Ok(Currency::Usd),
            "116" => Ok(Currency::Khr),
            _ => Err(KhqrError::UnsupportedCurrency(code.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
            Currency::Khr => write!(f, "KHR"),
        }
    }
}

impl FromStr for Currency {
    type Err = KhqrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "KHR" => Ok(Currency::Khr),
            _ => Err(KhqrError::UnsupportedCurrency(s.to_string())),
        }
    }
}

/// Static configuration of the receiving merchant.
///
/// Immutable for the process lifetime and passed explicitly into every codec
/// call, so tests can substitute alternate profiles without process-wide
/// side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub merchant_id: String,
    /// Display name, at most 25 bytes per the KHQR profile.
    pub merchant_name: String,
    /// City, at most 15 bytes per the KHQR profile.
    pub merchant_city: String,
    /// 2-letter ISO 3166-1 country code.
    pub country_code: String,
    pub currency: Currency,
    /// Settlement account at the scheme operator.
    pub account_number: String,
}

#[cfg(test)]
mod tests {
    use super::Currency;

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Usd.numeric_code(), "840");
        assert_eq!(Currency::Khr.numeric_code(), "116");
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!(" KHR ".parse::<Currency>().unwrap(), Currency::Khr);
        assert_eq!(Currency::from_numeric("840").unwrap(), Currency::Usd);
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let err = "EUR".parse::<Currency>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::KhqrError::UnsupportedCurrency(_)
        ));
        assert!(Currency::from_numeric("978").is_err());
    }
}
