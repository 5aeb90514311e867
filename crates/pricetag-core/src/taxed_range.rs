//! # Taxed Amount Range
//!
//! An ordered pair of [`TaxedAmount`]s in one currency. Ordering is the
//! taxed amount's gross-based ordering, so a range is valid when its stop
//! is not less than its start by gross.
//!
//! ```text
//! TaxedAmountRange
//! ├── start: TaxedAmount { net, gross }
//! └── stop:  TaxedAmount { net, gross }
//!                               ▲
//!                 start.gross <= stop.gross
//! ```

use pricetag_currency::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;
use crate::discount::Discountable;
use crate::error::{PriceError, PriceResult};
use crate::range::AmountRange;
use crate::rounding::Rounding;
use crate::taxed::TaxedAmount;

/// A closed interval of taxed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TaxedAmountRangeRepr")]
pub struct TaxedAmountRange {
    start: TaxedAmount,
    stop: TaxedAmount,
}

#[derive(Deserialize)]
struct TaxedAmountRangeRepr {
    start: TaxedAmount,
    stop: TaxedAmount,
}

impl TryFrom<TaxedAmountRangeRepr> for TaxedAmountRange {
    type Error = PriceError;

    fn try_from(repr: TaxedAmountRangeRepr) -> Result<Self, Self::Error> {
        TaxedAmountRange::new(repr.start, repr.stop)
    }
}

impl TaxedAmountRange {
    /// Creates a range, checking currency and gross ordering.
    pub fn new(start: TaxedAmount, stop: TaxedAmount) -> PriceResult<Self> {
        if start.currency() != stop.currency() {
            return Err(PriceError::invalid_range(format!(
                "start is in {} but stop is in {}",
                start.currency(),
                stop.currency()
            )));
        }
        if stop.less_than(&start)? {
            return Err(PriceError::invalid_range(format!(
                "stop gross {} is less than start gross {}",
                stop.gross().value(),
                start.gross().value()
            )));
        }
        Ok(TaxedAmountRange { start, stop })
    }

    /// The smallest range (by gross) containing every given taxed amount.
    pub fn spanning<I>(items: I) -> PriceResult<Self>
    where
        I: IntoIterator<Item = TaxedAmount>,
    {
        let mut items = items.into_iter();
        let first = items.next().ok_or_else(|| PriceError::MissingOperand {
            operand: "taxed amounts".to_string(),
        })?;

        let (mut start, mut stop) = (first, first);
        for item in items {
            if item.currency() != first.currency() {
                return Err(PriceError::invalid_range(format!(
                    "cannot span {} and {}",
                    first.currency(),
                    item.currency()
                )));
            }
            if item.less_than(&start)? {
                start = item;
            }
            if stop.less_than(&item)? {
                stop = item;
            }
        }
        TaxedAmountRange::new(start, stop)
    }

    #[inline]
    pub const fn start(&self) -> TaxedAmount {
        self.start
    }

    #[inline]
    pub const fn stop(&self) -> TaxedAmount {
        self.stop
    }

    #[inline]
    pub const fn currency(&self) -> CurrencyCode {
        self.start.currency()
    }

    /// The range of net amounts.
    ///
    /// Fails with `InvalidRange` when the nets run backwards (possible since
    /// the range is ordered by gross).
    pub fn net(&self) -> PriceResult<AmountRange> {
        AmountRange::new(self.start.net(), self.stop.net())
    }

    /// The range of gross amounts.
    pub fn gross(&self) -> PriceResult<AmountRange> {
        AmountRange::new(self.start.gross(), self.stop.gross())
    }

    /// Checks `start <= item <= stop` using taxed-amount ordering.
    ///
    /// A taxed amount in another currency is never contained.
    pub fn contains(&self, item: &TaxedAmount) -> bool {
        if item.currency() != self.currency() {
            return false;
        }
        matches!(
            (self.start.less_than_or_equal(item), item.less_than_or_equal(&self.stop)),
            (Ok(true), Ok(true))
        )
    }

    /// Returns a range with either end substituted, re-validated.
    pub fn replace(&self, start: Option<TaxedAmount>, stop: Option<TaxedAmount>) -> PriceResult<Self> {
        TaxedAmountRange::new(start.unwrap_or(self.start), stop.unwrap_or(self.stop))
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds a plain amount to net and gross of both ends.
    pub fn add(&self, other: &Amount) -> PriceResult<Self> {
        TaxedAmountRange::new(self.start.add(other)?, self.stop.add(other)?)
    }

    /// Adds a taxed amount to both ends.
    pub fn add_taxed(&self, other: &TaxedAmount) -> PriceResult<Self> {
        TaxedAmountRange::new(self.start.add_taxed(other)?, self.stop.add_taxed(other)?)
    }

    /// Adds `other.start` to the start and `other.stop` to the stop.
    pub fn add_range(&self, other: &AmountRange) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.add(&other.start())?,
            self.stop.add(&other.stop())?,
        )
    }

    pub fn add_taxed_range(&self, other: &TaxedAmountRange) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.add_taxed(&other.start)?,
            self.stop.add_taxed(&other.stop)?,
        )
    }

    pub fn sub(&self, other: &Amount) -> PriceResult<Self> {
        TaxedAmountRange::new(self.start.sub(other)?, self.stop.sub(other)?)
    }

    pub fn sub_taxed(&self, other: &TaxedAmount) -> PriceResult<Self> {
        TaxedAmountRange::new(self.start.sub_taxed(other)?, self.stop.sub_taxed(other)?)
    }

    pub fn sub_range(&self, other: &AmountRange) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.sub(&other.start())?,
            self.stop.sub(&other.stop())?,
        )
    }

    pub fn sub_taxed_range(&self, other: &TaxedAmountRange) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.sub_taxed(&other.start)?,
            self.stop.sub_taxed(&other.stop)?,
        )
    }

    pub fn mul(&self, factor: impl Into<Decimal>) -> PriceResult<Self> {
        let factor = factor.into();
        TaxedAmountRange::new(self.start.mul(factor)?, self.stop.mul(factor)?)
    }

    pub fn divide(&self, divisor: impl Into<Decimal>) -> PriceResult<Self> {
        let divisor = divisor.into();
        TaxedAmountRange::new(self.start.divide(divisor)?, self.stop.divide(divisor)?)
    }

    // =========================================================================
    // Comparison & Rounding
    // =========================================================================

    /// Both ends equal (net and gross).
    pub fn equal(&self, other: &TaxedAmountRange) -> PriceResult<bool> {
        Ok(self.start.equal(&other.start)? && self.stop.equal(&other.stop)?)
    }

    pub fn quantize(&self, rounding: Rounding, precision: Option<u32>) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.quantize(rounding, precision)?,
            self.stop.quantize(rounding, precision)?,
        )
    }
}

impl Discountable for TaxedAmountRange {
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.apply_fixed_discount(discount)?,
            self.stop.apply_fixed_discount(discount)?,
        )
    }

    fn apply_fractional_discount(&self, fraction: Decimal, from_gross: bool) -> PriceResult<Self> {
        TaxedAmountRange::new(
            self.start.apply_fractional_discount(fraction, from_gross)?,
            self.stop.apply_fractional_discount(fraction, from_gross)?,
        )
    }
}

impl fmt::Display for TaxedAmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaxedAmountRange{{{}, {}}}", self.start, self.stop)
    }
}
