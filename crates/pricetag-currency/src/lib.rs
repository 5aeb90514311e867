//! # pricetag-currency: ISO 4217 Registry
//!
//! The bottom layer of the pricetag workspace. Every money type upstream
//! asks this crate two questions: "is this a real currency?" and "how many
//! fraction digits does it use?".
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pricetag Workspace                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricetag-core                                │   │
//! │  │   Amount ─► AmountRange / TaxedAmount ─► TaxedAmountRange       │   │
//! │  │   discount engine, rounding, flat tax, config                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validate_currency / fraction_digits    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ pricetag-currency (THIS CRATE) ★                   │   │
//! │  │      static ISO 4217 table • binary search • no mutation        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use pricetag_currency::{fraction_digits, validate_currency};
//!
//! let usd = validate_currency("usd").unwrap();
//! assert_eq!(usd.as_str(), "USD");
//! assert_eq!(fraction_digits(usd), 2);
//!
//! let vnd = validate_currency("VND").unwrap();
//! assert_eq!(fraction_digits(vnd), 0);
//! ```

pub mod code;
pub mod error;
pub mod table;

pub use code::CurrencyCode;
pub use error::{CurrencyError, CurrencyResult};
pub use table::CurrencyInfo;

/// Validates a currency code and returns its normalized form.
///
/// Case-insensitive and idempotent: `validate_currency("usd")` and
/// `validate_currency("USD")` return the same [`CurrencyCode`].
#[inline]
pub fn validate_currency(code: &str) -> CurrencyResult<CurrencyCode> {
    CurrencyCode::parse(code)
}

/// Returns the canonical number of fraction digits for a currency.
#[inline]
pub fn fraction_digits(code: CurrencyCode) -> u32 {
    code.fraction_digits()
}

/// Looks up a table row by code (case-insensitive).
///
/// Returns `None` for malformed or unknown input.
pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    CurrencyCode::parse(code).ok().map(|code| code.info())
}

/// Every currency in the registry, sorted by code.
#[inline]
pub fn all() -> &'static [CurrencyInfo] {
    table::CURRENCIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_currency_case_insensitive() {
        assert_eq!(validate_currency("usd"), validate_currency("USD"));
        assert_eq!(validate_currency("Usd"), validate_currency("uSD"));
    }

    #[test]
    fn test_fraction_digits() {
        let cases = [("VND", 0), ("USD", 2), ("DKK", 2), ("JPY", 0), ("BHD", 3), ("CLF", 4)];
        for (code, expected) in cases {
            let code = validate_currency(code).unwrap();
            assert_eq!(fraction_digits(code), expected, "{}", code);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("eur").map(|info| info.name), Some("Euro"));
        assert!(lookup("eu").is_none());
        assert!(lookup("ZZZ").is_none());
    }

    #[test]
    fn test_all_contains_every_lookup() {
        assert!(all().iter().any(|info| info.code == "GBP"));
        assert!(all().len() > 150);
    }
}
