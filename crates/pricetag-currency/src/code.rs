//! # Currency Code
//!
//! [`CurrencyCode`] is a validated handle into the static ISO 4217 table.
//! It can only be obtained through [`CurrencyCode::parse`] (or
//! [`crate::validate_currency`]), so holding one proves the code is known
//! and normalized to uppercase.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CurrencyError, CurrencyResult};
use crate::table::{self, CurrencyInfo};

/// A normalized, registry-backed ISO 4217 currency code.
///
/// `Copy` and pointer-sized: comparing two codes compares their table rows.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(&'static CurrencyInfo);

impl CurrencyCode {
    /// Validates and normalizes a currency code.
    ///
    /// Matching is case-insensitive; the input must be exactly three ASCII
    /// letters.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_currency::CurrencyCode;
    ///
    /// let usd = CurrencyCode::parse("usd").unwrap();
    /// assert_eq!(usd.as_str(), "USD");
    /// assert_eq!(usd, CurrencyCode::parse("USD").unwrap());
    /// assert!(CurrencyCode::parse("dollars").is_err());
    /// ```
    pub fn parse(code: &str) -> CurrencyResult<Self> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CurrencyError::Malformed(code.to_string()));
        }

        let upper = code.to_ascii_uppercase();
        table::find(&upper)
            .map(CurrencyCode)
            .ok_or_else(|| CurrencyError::Unknown(code.to_string()))
    }

    /// Returns the uppercase alphabetic code.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0.code
    }

    /// Number of fraction digits of the currency's minor unit.
    #[inline]
    pub const fn fraction_digits(&self) -> u32 {
        self.0.digits
    }

    /// ISO 4217 numeric code.
    #[inline]
    pub const fn numeric(&self) -> u16 {
        self.0.numeric
    }

    /// English display name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.0.name
    }

    /// The full table row behind this code.
    #[inline]
    pub const fn info(&self) -> &'static CurrencyInfo {
        self.0
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CurrencyCode").field(&self.as_str()).finish()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CurrencyCode::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        for (input, expected) in [("vnd", "VND"), ("usD", "USD"), ("dkk", "DKK")] {
            assert_eq!(CurrencyCode::parse(input).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let once = CurrencyCode::parse("eur").unwrap();
        let twice = CurrencyCode::parse(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            CurrencyCode::parse("US"),
            Err(CurrencyError::Malformed("US".to_string()))
        );
        assert!(matches!(
            CurrencyCode::parse(" usd"),
            Err(CurrencyError::Malformed(_))
        ));
        assert!(matches!(
            CurrencyCode::parse("U$D"),
            Err(CurrencyError::Malformed(_))
        ));
        assert_eq!(
            CurrencyCode::parse("abc"),
            Err(CurrencyError::Unknown("abc".to_string()))
        );
    }

    #[test]
    fn test_accessors() {
        let jpy = CurrencyCode::parse("JPY").unwrap();
        assert_eq!(jpy.fraction_digits(), 0);
        assert_eq!(jpy.numeric(), 392);
        assert_eq!(jpy.name(), "Yen");
        assert_eq!(jpy.to_string(), "JPY");
        assert_eq!(format!("{:?}", jpy), "CurrencyCode(\"JPY\")");
    }

    #[test]
    fn test_serde() {
        let usd: CurrencyCode = "usd".parse().unwrap();
        assert_eq!(serde_json::to_string(&usd).unwrap(), "\"USD\"");

        let back: CurrencyCode = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(back, usd);

        assert!(serde_json::from_str::<CurrencyCode>("\"XYZ\"").is_err());
    }
}
