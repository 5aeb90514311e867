//! # Taxed Amount
//!
//! A net (tax-exclusive) and gross (tax-inclusive) pair of amounts in one
//! currency.
//!
//! ## Ordering vs Equality
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  less_than   compares GROSS only   (what the customer pays)             │
//! │  equal       compares NET and GROSS (both must match exactly)           │
//! │                                                                         │
//! │  net=10 gross=12  vs  net=9 gross=12                                    │
//! │    less_than → false (12 < 12 is false)                                 │
//! │    equal     → false (10 ≠ 9)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `gross >= net` is not enforced; [`TaxedAmount::tax`] reports a negative
//! tax as `NegativeAmount`.

use pricetag_currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;
use crate::discount::Discountable;
use crate::error::{PriceError, PriceResult};
use crate::rounding::Rounding;

/// Net and gross amounts of one price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TaxedAmountRepr")]
pub struct TaxedAmount {
    net: Amount,
    gross: Amount,
}

#[derive(Deserialize)]
struct TaxedAmountRepr {
    net: Amount,
    gross: Amount,
}

impl TryFrom<TaxedAmountRepr> for TaxedAmount {
    type Error = PriceError;

    fn try_from(repr: TaxedAmountRepr) -> Result<Self, Self::Error> {
        TaxedAmount::new(repr.net, repr.gross)
    }
}

impl TaxedAmount {
    /// Pairs a net and a gross amount of the same currency.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, TaxedAmount};
    /// use rust_decimal_macros::dec;
    ///
    /// let net = Amount::new(dec!(10), "EUR").unwrap();
    /// let gross = Amount::new(dec!(12.30), "EUR").unwrap();
    /// let price = TaxedAmount::new(net, gross).unwrap();
    /// assert_eq!(price.tax().unwrap().value(), dec!(2.30));
    /// ```
    pub fn new(net: Amount, gross: Amount) -> PriceResult<Self> {
        net.same_currency(&gross)?;
        Ok(TaxedAmount { net, gross })
    }

    /// A price with no tax: net and gross are both `amount`.
    pub const fn untaxed(amount: Amount) -> Self {
        TaxedAmount {
            net: amount,
            gross: amount,
        }
    }

    #[inline]
    pub const fn net(&self) -> Amount {
        self.net
    }

    #[inline]
    pub const fn gross(&self) -> Amount {
        self.gross
    }

    #[inline]
    pub const fn currency(&self) -> CurrencyCode {
        self.net.currency()
    }

    /// The tax portion, `gross - net`.
    pub fn tax(&self) -> PriceResult<Amount> {
        self.gross.sub(&self.net)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds a plain amount to both net and gross.
    pub fn add(&self, other: &Amount) -> PriceResult<Self> {
        TaxedAmount::new(self.net.add(other)?, self.gross.add(other)?)
    }

    /// Adds net to net and gross to gross.
    pub fn add_taxed(&self, other: &TaxedAmount) -> PriceResult<Self> {
        TaxedAmount::new(self.net.add(&other.net)?, self.gross.add(&other.gross)?)
    }

    /// Subtracts a plain amount from both net and gross.
    pub fn sub(&self, other: &Amount) -> PriceResult<Self> {
        TaxedAmount::new(self.net.sub(other)?, self.gross.sub(other)?)
    }

    pub fn sub_taxed(&self, other: &TaxedAmount) -> PriceResult<Self> {
        TaxedAmount::new(self.net.sub(&other.net)?, self.gross.sub(&other.gross)?)
    }

    pub fn mul(&self, factor: impl Into<Decimal>) -> PriceResult<Self> {
        let factor = factor.into();
        TaxedAmount::new(self.net.mul(factor)?, self.gross.mul(factor)?)
    }

    pub fn divide(&self, divisor: impl Into<Decimal>) -> PriceResult<Self> {
        let divisor = divisor.into();
        TaxedAmount::new(self.net.divide(divisor)?, self.gross.divide(divisor)?)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Gross-only ordering.
    pub fn less_than(&self, other: &TaxedAmount) -> PriceResult<bool> {
        self.gross.less_than(&other.gross)
    }

    /// Net and gross both equal.
    pub fn equal(&self, other: &TaxedAmount) -> PriceResult<bool> {
        Ok(self.net.equal(&other.net)? && self.gross.equal(&other.gross)?)
    }

    pub fn less_than_or_equal(&self, other: &TaxedAmount) -> PriceResult<bool> {
        Ok(self.less_than(other)? || self.equal(other)?)
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    /// Quantizes net and gross independently.
    pub fn quantize(&self, rounding: Rounding, precision: Option<u32>) -> PriceResult<Self> {
        TaxedAmount::new(
            self.net.quantize(rounding, precision),
            self.gross.quantize(rounding, precision),
        )
    }
}

impl Discountable for TaxedAmount {
    /// Discounts net and gross by the same flat amount, each floored at zero.
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Self> {
        TaxedAmount::new(
            self.net.apply_fixed_discount(discount)?,
            self.gross.apply_fixed_discount(discount)?,
        )
    }

    /// Derives one discount from gross (or net) and subtracts it from both.
    ///
    /// ```text
    /// net=100 gross=123, 10% from gross
    ///   discount = quantize(123 × 0.10, Down) = 12.30
    ///   result   = net 87.70, gross 110.70
    /// ```
    fn apply_fractional_discount(&self, fraction: Decimal, from_gross: bool) -> PriceResult<Self> {
        let base = if from_gross { self.gross } else { self.net };
        let discount = base.mul(fraction)?.quantize(Rounding::Down, None);
        self.apply_fixed_discount(&discount)
    }
}

impl From<Amount> for TaxedAmount {
    fn from(amount: Amount) -> Self {
        TaxedAmount::untaxed(amount)
    }
}

impl fmt::Display for TaxedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaxedAmount{{net={}, gross={}}}", self.net, self.gross)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(value: Decimal) -> Amount {
        Amount::new(value, "USD").unwrap()
    }

    fn taxed(net: Decimal, gross: Decimal) -> TaxedAmount {
        TaxedAmount::new(usd(net), usd(gross)).unwrap()
    }

    #[test]
    fn test_new_requires_same_currency() {
        let eur = Amount::new(dec!(12), "EUR").unwrap();
        assert!(matches!(
            TaxedAmount::new(usd(dec!(10)), eur),
            Err(PriceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_gross_below_net_is_allowed() {
        let odd = taxed(dec!(12), dec!(10));
        assert_eq!(odd.tax(), Err(PriceError::NegativeAmount(dec!(-2))));
    }

    #[test]
    fn test_tax_is_gross_minus_net() {
        let price = taxed(dec!(10), dec!(12.30));
        assert_eq!(price.tax().unwrap(), price.gross().sub(&price.net()).unwrap());
        assert_eq!(price.currency().as_str(), "USD");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            taxed(dec!(1), dec!(2)).to_string(),
            "TaxedAmount{net=Amount{1, USD}, gross=Amount{2, USD}}"
        );
    }

    #[test]
    fn test_untaxed() {
        let price: TaxedAmount = usd(dec!(5)).into();
        assert!(price.tax().unwrap().is_zero());
    }

    #[test]
    fn test_ordering_uses_gross_equality_uses_both() {
        let a = taxed(dec!(10), dec!(12));
        let b = taxed(dec!(9), dec!(12));
        let c = taxed(dec!(1), dec!(13));

        assert!(!a.less_than(&b).unwrap());
        assert!(!a.equal(&b).unwrap());
        assert!(!a.less_than_or_equal(&b).unwrap());
        assert!(a.less_than(&c).unwrap());
        assert!(a.less_than_or_equal(&a).unwrap());
    }

    #[test]
    fn test_arithmetic() {
        let price = taxed(dec!(10), dec!(12));
        let plus = price.add(&usd(dec!(1))).unwrap();
        assert!(plus.equal(&taxed(dec!(11), dec!(13))).unwrap());

        let sum = price.add_taxed(&taxed(dec!(1), dec!(2))).unwrap();
        assert!(sum.equal(&taxed(dec!(11), dec!(14))).unwrap());

        let diff = sum.sub_taxed(&taxed(dec!(1), dec!(2))).unwrap();
        assert!(diff.equal(&price).unwrap());

        let minus = price.sub(&usd(dec!(10))).unwrap();
        assert!(minus.net().is_zero());
        assert!(matches!(price.sub(&usd(dec!(11))), Err(PriceError::NegativeAmount(_))));

        assert!(price.mul(2).unwrap().equal(&taxed(dec!(20), dec!(24))).unwrap());
        assert!(price.divide(2).unwrap().equal(&taxed(dec!(5), dec!(6))).unwrap());
    }

    #[test]
    fn test_quantize() {
        let price = taxed(dec!(10.005), dec!(12.3456)).quantize(Rounding::HalfUp, None).unwrap();
        assert_eq!(price.net().value(), dec!(10.01));
        assert_eq!(price.gross().value(), dec!(12.35));
    }

    #[test]
    fn test_fractional_discount_from_gross() {
        let price = taxed(dec!(100), dec!(123));
        let discounted = price.apply_fractional_discount(dec!(0.1), true).unwrap();
        assert_eq!(discounted.net().value(), dec!(87.70));
        assert_eq!(discounted.gross().value(), dec!(110.70));
    }

    #[test]
    fn test_fractional_discount_from_net() {
        let price = taxed(dec!(100), dec!(123));
        let discounted = price.apply_fractional_discount(dec!(0.1), false).unwrap();
        assert_eq!(discounted.net().value(), dec!(90));
        assert_eq!(discounted.gross().value(), dec!(113));
    }

    #[test]
    fn test_fixed_discount_floors_each_side() {
        let price = taxed(dec!(8), dec!(10));
        let discounted = price.apply_fixed_discount(&usd(dec!(9))).unwrap();
        assert!(discounted.net().is_zero());
        assert_eq!(discounted.gross().value(), dec!(1));
    }

    #[test]
    fn test_percentage_discount() {
        let price = taxed(dec!(200), dec!(246));
        let discounted = price.apply_percentage_discount(25, false).unwrap();
        assert_eq!(discounted.net().value(), dec!(150));
        assert_eq!(discounted.gross().value(), dec!(196));
    }
}
