//! # Amount Range
//!
//! An ordered pair of amounts in one currency, used for "from 23.45 to
//! 50.00" style prices.
//!
//! ## Reconstruct-and-Revalidate
//! ```text
//! range.op(x)
//!    │
//!    ├──► start.op(x) ──┐
//!    │                  ├──► AmountRange::new(start', stop')
//!    └──► stop.op(x)  ──┘         │
//!                                 ├── currencies differ?  → InvalidRange
//!                                 ├── stop' < start'?     → InvalidRange
//!                                 └── OK → new range
//! ```
//! Every operation builds its result through [`AmountRange::new`], so a
//! range can never come out of an operation with its ends swapped.

use pricetag_currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;
use crate::discount::Discountable;
use crate::error::{PriceError, PriceResult};
use crate::rounding::Rounding;

/// A closed interval `start..=stop` of amounts in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRangeRepr")]
pub struct AmountRange {
    start: Amount,
    stop: Amount,
}

#[derive(Deserialize)]
struct AmountRangeRepr {
    start: Amount,
    stop: Amount,
}

impl TryFrom<AmountRangeRepr> for AmountRange {
    type Error = PriceError;

    fn try_from(repr: AmountRangeRepr) -> Result<Self, Self::Error> {
        AmountRange::new(repr.start, repr.stop)
    }
}

impl AmountRange {
    /// Creates a range, checking currency and ordering.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, AmountRange, PriceError};
    /// use rust_decimal_macros::dec;
    ///
    /// let low = Amount::new(dec!(23), "USD").unwrap();
    /// let high = Amount::new(dec!(50), "USD").unwrap();
    ///
    /// assert!(AmountRange::new(low, high).is_ok());
    /// assert!(matches!(AmountRange::new(high, low), Err(PriceError::InvalidRange { .. })));
    /// ```
    pub fn new(start: Amount, stop: Amount) -> PriceResult<Self> {
        if start.currency() != stop.currency() {
            return Err(PriceError::invalid_range(format!(
                "start is in {} but stop is in {}",
                start.currency(),
                stop.currency()
            )));
        }
        if stop.value() < start.value() {
            return Err(PriceError::invalid_range(format!(
                "stop {} is less than start {}",
                stop.value(),
                start.value()
            )));
        }
        Ok(AmountRange { start, stop })
    }

    /// The smallest range containing every given amount.
    ///
    /// Fails with `MissingOperand` when the iterator is empty.
    pub fn spanning<I>(amounts: I) -> PriceResult<Self>
    where
        I: IntoIterator<Item = Amount>,
    {
        let mut amounts = amounts.into_iter();
        let first = amounts.next().ok_or_else(|| PriceError::MissingOperand {
            operand: "amounts".to_string(),
        })?;

        let (mut start, mut stop) = (first, first);
        for amount in amounts {
            if amount.currency() != first.currency() {
                return Err(PriceError::invalid_range(format!(
                    "cannot span {} and {}",
                    first.currency(),
                    amount.currency()
                )));
            }
            if amount.value() < start.value() {
                start = amount;
            }
            if amount.value() > stop.value() {
                stop = amount;
            }
        }
        AmountRange::new(start, stop)
    }

    #[inline]
    pub const fn start(&self) -> Amount {
        self.start
    }

    #[inline]
    pub const fn stop(&self) -> Amount {
        self.stop
    }

    #[inline]
    pub const fn currency(&self) -> CurrencyCode {
        self.start.currency()
    }

    /// Checks `start <= item <= stop`.
    ///
    /// An amount in another currency is never contained.
    pub fn contains(&self, item: &Amount) -> bool {
        item.currency() == self.currency()
            && self.start.value() <= item.value()
            && item.value() <= self.stop.value()
    }

    /// Returns a range with either end substituted, re-validated.
    pub fn replace(&self, start: Option<Amount>, stop: Option<Amount>) -> PriceResult<Self> {
        AmountRange::new(start.unwrap_or(self.start), stop.unwrap_or(self.stop))
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds an amount to both ends.
    pub fn add(&self, other: &Amount) -> PriceResult<Self> {
        AmountRange::new(self.start.add(other)?, self.stop.add(other)?)
    }

    /// Adds ranges end to end (`start + start`, `stop + stop`).
    pub fn add_range(&self, other: &AmountRange) -> PriceResult<Self> {
        AmountRange::new(self.start.add(&other.start)?, self.stop.add(&other.stop)?)
    }

    /// Subtracts an amount from both ends.
    pub fn sub(&self, other: &Amount) -> PriceResult<Self> {
        AmountRange::new(self.start.sub(other)?, self.stop.sub(other)?)
    }

    /// Subtracts ranges end to end.
    pub fn sub_range(&self, other: &AmountRange) -> PriceResult<Self> {
        AmountRange::new(self.start.sub(&other.start)?, self.stop.sub(&other.stop)?)
    }

    pub fn mul(&self, factor: impl Into<Decimal>) -> PriceResult<Self> {
        let factor = factor.into();
        AmountRange::new(self.start.mul(factor)?, self.stop.mul(factor)?)
    }

    pub fn divide(&self, divisor: impl Into<Decimal>) -> PriceResult<Self> {
        let divisor = divisor.into();
        AmountRange::new(self.start.divide(divisor)?, self.stop.divide(divisor)?)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Both ends equal.
    pub fn equal(&self, other: &AmountRange) -> PriceResult<bool> {
        Ok(self.start.equal(&other.start)? && self.stop.equal(&other.stop)?)
    }

    /// Both ends strictly less than the other range's ends.
    pub fn less_than(&self, other: &AmountRange) -> PriceResult<bool> {
        Ok(self.start.less_than(&other.start)? && self.stop.less_than(&other.stop)?)
    }

    pub fn less_than_or_equal(&self, other: &AmountRange) -> PriceResult<bool> {
        Ok(self.less_than(other)? || self.equal(other)?)
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    /// Quantizes both ends. See [`Amount::quantize`].
    pub fn quantize(&self, rounding: Rounding, precision: Option<u32>) -> PriceResult<Self> {
        AmountRange::new(
            self.start.quantize(rounding, precision),
            self.stop.quantize(rounding, precision),
        )
    }
}

impl Discountable for AmountRange {
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Self> {
        AmountRange::new(
            self.start.apply_fixed_discount(discount)?,
            self.stop.apply_fixed_discount(discount)?,
        )
    }

    /// Each end is discounted by its own share, so the range shrinks
    /// proportionally.
    fn apply_fractional_discount(&self, fraction: Decimal, from_gross: bool) -> PriceResult<Self> {
        AmountRange::new(
            self.start.apply_fractional_discount(fraction, from_gross)?,
            self.stop.apply_fractional_discount(fraction, from_gross)?,
        )
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AmountRange{{{}, {}}}", self.start, self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(value: Decimal) -> Amount {
        Amount::new(value, "USD").unwrap()
    }

    fn usd_range(start: Decimal, stop: Decimal) -> AmountRange {
        AmountRange::new(usd(start), usd(stop)).unwrap()
    }

    #[test]
    fn test_new_checks_order() {
        let range = usd_range(dec!(23.45), dec!(50));
        assert_eq!(range.start().value(), dec!(23.45));
        assert_eq!(range.stop().value(), dec!(50));

        assert!(matches!(
            AmountRange::new(usd(dec!(50)), usd(dec!(23))),
            Err(PriceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_new_allows_single_point() {
        assert!(AmountRange::new(usd(dec!(5)), usd(dec!(5.00))).is_ok());
    }

    #[test]
    fn test_new_rejects_mixed_currencies() {
        let eur = Amount::new(dec!(60), "EUR").unwrap();
        assert!(matches!(
            AmountRange::new(usd(dec!(50)), eur),
            Err(PriceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            usd_range(dec!(1), dec!(2)).to_string(),
            "AmountRange{Amount{1, USD}, Amount{2, USD}}"
        );
    }

    #[test]
    fn test_spanning() {
        let range = AmountRange::spanning([usd(dec!(7)), usd(dec!(2)), usd(dec!(9.5))]).unwrap();
        assert!(range.equal(&usd_range(dec!(2), dec!(9.5))).unwrap());

        assert_eq!(
            AmountRange::spanning(Vec::new()),
            Err(PriceError::MissingOperand {
                operand: "amounts".to_string()
            })
        );

        let eur = Amount::new(dec!(1), "EUR").unwrap();
        assert!(matches!(
            AmountRange::spanning([usd(dec!(1)), eur]),
            Err(PriceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_contains() {
        let range = usd_range(dec!(10), dec!(20));
        assert!(range.contains(&usd(dec!(10))));
        assert!(range.contains(&usd(dec!(15))));
        assert!(range.contains(&usd(dec!(20))));
        assert!(!range.contains(&usd(dec!(20.01))));
        assert!(!range.contains(&Amount::new(dec!(15), "EUR").unwrap()));
    }

    #[test]
    fn test_replace() {
        let range = usd_range(dec!(10), dec!(20));
        let wider = range.replace(Some(usd(dec!(5))), None).unwrap();
        assert_eq!(wider.start().value(), dec!(5));
        assert_eq!(wider.stop().value(), dec!(20));

        assert!(range.replace(None, Some(usd(dec!(1)))).is_err());
        assert_eq!(range.replace(None, None).unwrap(), range);
    }

    #[test]
    fn test_add_and_sub_amount() {
        let range = usd_range(dec!(23.45), dec!(50));
        let shifted = range.sub(&usd(dec!(2))).unwrap();
        assert_eq!(shifted.start().value(), dec!(21.45));
        assert_eq!(shifted.stop().value(), dec!(48));

        let back = shifted.add(&usd(dec!(2))).unwrap();
        assert!(back.equal(&range).unwrap());
    }

    #[test]
    fn test_range_arithmetic_revalidates() {
        let range = usd_range(dec!(10), dec!(20));
        let sum = range.add_range(&usd_range(dec!(1), dec!(2))).unwrap();
        assert!(sum.equal(&usd_range(dec!(11), dec!(22))).unwrap());

        // 10 - 1 = 9, 20 - 15 = 5: ends cross over.
        assert!(matches!(
            range.sub_range(&usd_range(dec!(1), dec!(15))),
            Err(PriceError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_mul_and_divide() {
        let range = usd_range(dec!(10), dec!(20));
        assert!(range.mul(2).unwrap().equal(&usd_range(dec!(20), dec!(40))).unwrap());
        assert!(range.divide(4).unwrap().equal(&usd_range(dec!(2.5), dec!(5))).unwrap());
        assert_eq!(range.divide(0), Err(PriceError::DivideByZero));
    }

    #[test]
    fn test_ordering() {
        let low = usd_range(dec!(1), dec!(5));
        let high = usd_range(dec!(2), dec!(6));
        let overlapping = usd_range(dec!(0), dec!(10));
        assert!(low.less_than(&high).unwrap());
        assert!(!low.less_than(&overlapping).unwrap());
        assert!(low.less_than_or_equal(&low).unwrap());
    }

    #[test]
    fn test_quantize() {
        let range = usd_range(dec!(1.234), dec!(5.678)).quantize(Rounding::Up, None).unwrap();
        assert_eq!(range.start().value(), dec!(1.24));
        assert_eq!(range.stop().value(), dec!(5.68));
    }

    #[test]
    fn test_fixed_discount_each_end() {
        let range = usd_range(dec!(5), dec!(20));
        let discounted = range.apply_fixed_discount(&usd(dec!(8))).unwrap();
        assert!(discounted.start().is_zero());
        assert_eq!(discounted.stop().value(), dec!(12));
    }

    #[test]
    fn test_fractional_discount_each_end() {
        let range = Amount::new(dec!(400.67), "VND")
            .and_then(|start| AmountRange::new(start, Amount::new(dec!(800.2365), "VND")?))
            .unwrap();
        // VND has no minor unit: 400.67 * 0.135 = 54.09045 -> 54; 800.2365 * 0.135 = 108.03... -> 108
        let discounted = range.apply_fractional_discount(dec!(0.135), true).unwrap();
        assert_eq!(discounted.start().value(), dec!(346.67));
        assert_eq!(discounted.stop().value(), dec!(692.2365));
    }
}
