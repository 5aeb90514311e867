//! # Discount Engine
//!
//! Fixed, fractional and percentage discounts over every price kind.
//!
//! ## Recursive Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  TaxedAmountRange ──► start: TaxedAmount, stop: TaxedAmount             │
//! │                              │                                          │
//! │  AmountRange ──► start: Amount, stop: Amount                            │
//! │                              │                                          │
//! │  TaxedAmount ──► one discount from gross (or net), applied to BOTH      │
//! │                              │                                          │
//! │  Amount ──► self - discount, floored at zero   ◄── base case            │
//! │                                                                         │
//! │  Ranges: each end discounted independently (proportional per end)       │
//! │  Taxed:  discount derived once, subtracted from net and gross alike     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricetag_core::{percentage_discount, Amount, PriceValue};
//! use rust_decimal_macros::dec;
//!
//! let price = PriceValue::from(Amount::new(dec!(566.64), "USD").unwrap());
//! let discounted = percentage_discount(&price, 50, true).unwrap();
//! assert_eq!(discounted.as_amount().unwrap().value(), dec!(283.32));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::{PriceError, PriceResult};
use crate::price::PriceValue;

// =============================================================================
// Discountable Trait
// =============================================================================

/// A price that can be discounted.
///
/// Implemented by [`Amount`], [`crate::AmountRange`], [`crate::TaxedAmount`],
/// [`crate::TaxedAmountRange`] and [`PriceValue`]. Every result has the same
/// kind as the input.
pub trait Discountable: Sized {
    /// Subtracts a flat amount. Amounts never drop below zero.
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Self>;

    /// Subtracts `fraction` of the price, rounded down to the currency's
    /// precision. `from_gross` picks the base of taxed amounts.
    fn apply_fractional_discount(&self, fraction: Decimal, from_gross: bool) -> PriceResult<Self>;

    /// Subtracts `percentage` percent of the price.
    fn apply_percentage_discount(
        &self,
        percentage: impl Into<Decimal>,
        from_gross: bool,
    ) -> PriceResult<Self> {
        let fraction = percentage_to_fraction(percentage.into())?;
        self.apply_fractional_discount(fraction, from_gross)
    }
}

fn percentage_to_fraction(percentage: Decimal) -> PriceResult<Decimal> {
    percentage
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(PriceError::Overflow)
}

// =============================================================================
// Engine Functions
// =============================================================================

/// Applies a fixed discount to any price kind.
pub fn fixed_discount(base: &PriceValue, discount: &Amount) -> PriceResult<PriceValue> {
    base.apply_fixed_discount(discount)
}

/// Applies a fractional discount (`0.2` = 20%) to any price kind.
pub fn fractional_discount(
    base: &PriceValue,
    fraction: Decimal,
    from_gross: bool,
) -> PriceResult<PriceValue> {
    base.apply_fractional_discount(fraction, from_gross)
}

/// Applies a percentage discount (`20` = 20%) to any price kind.
pub fn percentage_discount(
    base: &PriceValue,
    percentage: impl Into<Decimal>,
    from_gross: bool,
) -> PriceResult<PriceValue> {
    base.apply_percentage_discount(percentage, from_gross)
}

// =============================================================================
// Discount Rule
// =============================================================================

/// A discount stored as data, applied later to any price.
///
/// ## Example
/// ```rust
/// use pricetag_core::{Amount, Discount, PriceValue};
/// use rust_decimal_macros::dec;
///
/// let rule = Discount::Percentage(dec!(10));
/// let price = PriceValue::from(Amount::new(dec!(50), "EUR").unwrap());
/// let result = rule.apply(&price, false).unwrap();
/// assert_eq!(result.as_amount().unwrap().value(), dec!(45));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Flat amount off.
    Fixed(Amount),
    /// Fraction of the price off (`0.25` = a quarter).
    Fractional(Decimal),
    /// Percent of the price off (`25` = a quarter).
    Percentage(Decimal),
}

impl Discount {
    /// Applies this discount. `from_gross` only matters for taxed prices.
    pub fn apply(&self, base: &PriceValue, from_gross: bool) -> PriceResult<PriceValue> {
        match self {
            Discount::Fixed(amount) => fixed_discount(base, amount),
            Discount::Fractional(fraction) => fractional_discount(base, *fraction, from_gross),
            Discount::Percentage(percentage) => percentage_discount(base, *percentage, from_gross),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AmountRange, TaxedAmount, TaxedAmountRange};
    use rust_decimal_macros::dec;

    fn usd(value: Decimal) -> Amount {
        Amount::new(value, "USD").unwrap()
    }

    fn taxed(net: Decimal, gross: Decimal) -> TaxedAmount {
        TaxedAmount::new(usd(net), usd(gross)).unwrap()
    }

    #[test]
    fn test_fixed_discount_keeps_kind() {
        let cases: Vec<PriceValue> = vec![
            usd(dec!(10)).into(),
            AmountRange::new(usd(dec!(10)), usd(dec!(20))).unwrap().into(),
            taxed(dec!(10), dec!(12)).into(),
            TaxedAmountRange::new(taxed(dec!(10), dec!(12)), taxed(dec!(20), dec!(24)))
                .unwrap()
                .into(),
        ];

        for price in cases {
            let result = fixed_discount(&price, &usd(dec!(1))).unwrap();
            assert_eq!(result.kind(), price.kind());
        }
    }

    #[test]
    fn test_fixed_discount_floor() {
        let price: PriceValue = usd(dec!(5)).into();
        let result = fixed_discount(&price, &usd(dec!(7))).unwrap();
        let amount = result.as_amount().unwrap();
        assert!(amount.is_zero());
        assert_eq!(amount.currency().as_str(), "USD");
    }

    #[test]
    fn test_percentage_matches_fractional() {
        let price: PriceValue = taxed(dec!(80), dec!(98.40)).into();
        let by_percent = percentage_discount(&price, dec!(12.5), true).unwrap();
        let by_fraction = fractional_discount(&price, dec!(0.125), true).unwrap();
        assert_eq!(by_percent, by_fraction);
    }

    #[test]
    fn test_range_ends_discounted_independently() {
        let price: PriceValue = AmountRange::new(usd(dec!(10)), usd(dec!(30))).unwrap().into();
        let result = percentage_discount(&price, 10, false).unwrap();
        let range = result.as_amount_range().unwrap();
        assert_eq!(range.start().value(), dec!(9));
        assert_eq!(range.stop().value(), dec!(27));
    }

    #[test]
    fn test_taxed_discount_is_uniform_across_net_and_gross() {
        let price: PriceValue = taxed(dec!(100), dec!(120)).into();
        let result = percentage_discount(&price, 10, true).unwrap();
        let taxed = result.as_taxed_amount().unwrap();
        // One discount of 12.00 off both sides, not 10% of each side.
        assert_eq!(taxed.net().value(), dec!(88));
        assert_eq!(taxed.gross().value(), dec!(108));
    }

    #[test]
    fn test_negative_fraction_is_rejected() {
        let price: PriceValue = usd(dec!(10)).into();
        assert!(matches!(
            fractional_discount(&price, dec!(-0.1), false),
            Err(PriceError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_discount_rule() {
        let price: PriceValue = usd(dec!(40)).into();
        let fixed = Discount::Fixed(usd(dec!(15))).apply(&price, false).unwrap();
        assert_eq!(fixed.as_amount().unwrap().value(), dec!(25));

        let fractional = Discount::Fractional(dec!(0.25)).apply(&price, false).unwrap();
        assert_eq!(fractional.as_amount().unwrap().value(), dec!(30));
    }

    #[test]
    fn test_discount_rule_serde() {
        let rule = Discount::Percentage(dec!(15));
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"kind":"percentage","value":"15"}"#);
        assert_eq!(serde_json::from_str::<Discount>(&json).unwrap(), rule);
    }
}
