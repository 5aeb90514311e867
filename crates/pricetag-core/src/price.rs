//! # Price Values
//!
//! [`PriceValue`] holds any of the four price kinds, so callers can discount,
//! quantize or add prices without knowing which kind they hold.
//!
//! ## Operand Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base \ operand     Amount  AmountRange  TaxedAmount  TaxedAmountRange  │
//! │  ─────────────────  ──────  ───────────  ───────────  ────────────────  │
//! │  Amount               ✅        ❌            ❌              ❌          │
//! │  AmountRange          ✅        ✅            ❌              ❌          │
//! │  TaxedAmount          ✅        ❌            ✅              ❌          │
//! │  TaxedAmountRange     ✅        ✅            ✅              ✅          │
//! │                                                                         │
//! │  ❌ → PriceError::UnsupportedOperandType                                │
//! └─────────────────────────────────────────────────────────────────────────┘
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
use crate::taxed_range::TaxedAmountRange;

// =============================================================================
// PriceValue
// =============================================================================

/// One price of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceValue {
    Amount(Amount),
    AmountRange(AmountRange),
    TaxedAmount(TaxedAmount),
    TaxedAmountRange(TaxedAmountRange),
}

impl PriceValue {
    /// The kind name, as used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            PriceValue::Amount(_) => "Amount",
            PriceValue::AmountRange(_) => "AmountRange",
            PriceValue::TaxedAmount(_) => "TaxedAmount",
            PriceValue::TaxedAmountRange(_) => "TaxedAmountRange",
        }
    }

    pub const fn currency(&self) -> CurrencyCode {
        match self {
            PriceValue::Amount(amount) => amount.currency(),
            PriceValue::AmountRange(range) => range.currency(),
            PriceValue::TaxedAmount(taxed) => taxed.currency(),
            PriceValue::TaxedAmountRange(range) => range.currency(),
        }
    }

    pub const fn as_amount(&self) -> Option<&Amount> {
        match self {
            PriceValue::Amount(amount) => Some(amount),
            _ => None,
        }
    }

    pub const fn as_amount_range(&self) -> Option<&AmountRange> {
        match self {
            PriceValue::AmountRange(range) => Some(range),
            _ => None,
        }
    }

    pub const fn as_taxed_amount(&self) -> Option<&TaxedAmount> {
        match self {
            PriceValue::TaxedAmount(taxed) => Some(taxed),
            _ => None,
        }
    }

    pub const fn as_taxed_amount_range(&self) -> Option<&TaxedAmountRange> {
        match self {
            PriceValue::TaxedAmountRange(range) => Some(range),
            _ => None,
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds `other` to this price. The result has this price's kind.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, AmountRange, PriceError, PriceValue};
    /// use rust_decimal_macros::dec;
    ///
    /// let one = Amount::new(dec!(1), "USD").unwrap();
    /// let range = AmountRange::new(one, Amount::new(dec!(5), "USD").unwrap()).unwrap();
    ///
    /// let shifted = PriceValue::from(range).add(&one.into()).unwrap();
    /// assert_eq!(shifted.as_amount_range().unwrap().stop().value(), dec!(6));
    ///
    /// // A plain amount cannot absorb a range.
    /// let err = PriceValue::from(one).add(&range.into()).unwrap_err();
    /// assert!(matches!(err, PriceError::UnsupportedOperandType { .. }));
    /// ```
    pub fn add(&self, other: &PriceValue) -> PriceResult<PriceValue> {
        let result = match (self, other) {
            (Self::Amount(base), Self::Amount(op)) => Self::Amount(base.add(op)?),
            (Self::AmountRange(base), Self::Amount(op)) => Self::AmountRange(base.add(op)?),
            (Self::AmountRange(base), Self::AmountRange(op)) => Self::AmountRange(base.add_range(op)?),
            (Self::TaxedAmount(base), Self::Amount(op)) => Self::TaxedAmount(base.add(op)?),
            (Self::TaxedAmount(base), Self::TaxedAmount(op)) => Self::TaxedAmount(base.add_taxed(op)?),
            (Self::TaxedAmountRange(base), Self::Amount(op)) => Self::TaxedAmountRange(base.add(op)?),
            (Self::TaxedAmountRange(base), Self::AmountRange(op)) => Self::TaxedAmountRange(base.add_range(op)?),
            (Self::TaxedAmountRange(base), Self::TaxedAmount(op)) => Self::TaxedAmountRange(base.add_taxed(op)?),
            (Self::TaxedAmountRange(base), Self::TaxedAmountRange(op)) => {
                Self::TaxedAmountRange(base.add_taxed_range(op)?)
            }
            _ => return Err(self.unsupported("add", other)),
        };
        Ok(result)
    }

    /// Subtracts `other` from this price. Same pairings as [`PriceValue::add`].
    pub fn sub(&self, other: &PriceValue) -> PriceResult<PriceValue> {
        let result = match (self, other) {
            (Self::Amount(base), Self::Amount(op)) => Self::Amount(base.sub(op)?),
            (Self::AmountRange(base), Self::Amount(op)) => Self::AmountRange(base.sub(op)?),
            (Self::AmountRange(base), Self::AmountRange(op)) => Self::AmountRange(base.sub_range(op)?),
            (Self::TaxedAmount(base), Self::Amount(op)) => Self::TaxedAmount(base.sub(op)?),
            (Self::TaxedAmount(base), Self::TaxedAmount(op)) => Self::TaxedAmount(base.sub_taxed(op)?),
            (Self::TaxedAmountRange(base), Self::Amount(op)) => Self::TaxedAmountRange(base.sub(op)?),
            (Self::TaxedAmountRange(base), Self::AmountRange(op)) => Self::TaxedAmountRange(base.sub_range(op)?),
            (Self::TaxedAmountRange(base), Self::TaxedAmount(op)) => Self::TaxedAmountRange(base.sub_taxed(op)?),
            (Self::TaxedAmountRange(base), Self::TaxedAmountRange(op)) => {
                Self::TaxedAmountRange(base.sub_taxed_range(op)?)
            }
            _ => return Err(self.unsupported("subtract", other)),
        };
        Ok(result)
    }

    pub fn mul(&self, factor: impl Into<Decimal>) -> PriceResult<PriceValue> {
        let factor = factor.into();
        self.map(
            |amount| amount.mul(factor),
            |range| range.mul(factor),
            |taxed| taxed.mul(factor),
            |range| range.mul(factor),
        )
    }

    pub fn divide(&self, divisor: impl Into<Decimal>) -> PriceResult<PriceValue> {
        let divisor = divisor.into();
        self.map(
            |amount| amount.divide(divisor),
            |range| range.divide(divisor),
            |taxed| taxed.divide(divisor),
            |range| range.divide(divisor),
        )
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    /// Quantizes every amount inside this price.
    ///
    /// `precision = None` uses the currency's minor-unit digits.
    pub fn quantize(&self, rounding: Rounding, precision: Option<u32>) -> PriceResult<PriceValue> {
        self.map(
            |amount| Ok(amount.quantize(rounding, precision)),
            |range| range.quantize(rounding, precision),
            |taxed| taxed.quantize(rounding, precision),
            |range| range.quantize(rounding, precision),
        )
    }

    fn map(
        &self,
        on_amount: impl FnOnce(&Amount) -> PriceResult<Amount>,
        on_range: impl FnOnce(&AmountRange) -> PriceResult<AmountRange>,
        on_taxed: impl FnOnce(&TaxedAmount) -> PriceResult<TaxedAmount>,
        on_taxed_range: impl FnOnce(&TaxedAmountRange) -> PriceResult<TaxedAmountRange>,
    ) -> PriceResult<PriceValue> {
        Ok(match self {
            PriceValue::Amount(amount) => on_amount(amount)?.into(),
            PriceValue::AmountRange(range) => on_range(range)?.into(),
            PriceValue::TaxedAmount(taxed) => on_taxed(taxed)?.into(),
            PriceValue::TaxedAmountRange(range) => on_taxed_range(range)?.into(),
        })
    }

    fn unsupported(&self, operation: &'static str, other: &PriceValue) -> PriceError {
        PriceError::UnsupportedOperandType {
            operation,
            base: self.kind(),
            operand: other.kind(),
        }
    }
}

/// Quantizes any price kind to its currency's precision.
///
/// ## Example
/// ```rust
/// use pricetag_core::{quantize_any, Amount, PriceValue, Rounding};
/// use rust_decimal_macros::dec;
///
/// let price = PriceValue::from(Amount::new(dec!(34.497), "USD").unwrap());
/// let rounded = quantize_any(&price, Rounding::Up).unwrap();
/// assert_eq!(rounded.as_amount().unwrap().value(), dec!(34.50));
/// ```
pub fn quantize_any(value: &PriceValue, rounding: Rounding) -> PriceResult<PriceValue> {
    value.quantize(rounding, None)
}

// =============================================================================
// Discounts
// =============================================================================

impl Discountable for PriceValue {
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Self> {
        self.map(
            |amount| amount.apply_fixed_discount(discount),
            |range| range.apply_fixed_discount(discount),
            |taxed| taxed.apply_fixed_discount(discount),
            |range| range.apply_fixed_discount(discount),
        )
    }

    fn apply_fractional_discount(&self, fraction: Decimal, from_gross: bool) -> PriceResult<Self> {
        self.map(
            |amount| amount.apply_fractional_discount(fraction, from_gross),
            |range| range.apply_fractional_discount(fraction, from_gross),
            |taxed| taxed.apply_fractional_discount(fraction, from_gross),
            |range| range.apply_fractional_discount(fraction, from_gross),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl From<Amount> for PriceValue {
    fn from(amount: Amount) -> Self {
        PriceValue::Amount(amount)
    }
}

impl From<AmountRange> for PriceValue {
    fn from(range: AmountRange) -> Self {
        PriceValue::AmountRange(range)
    }
}

impl From<TaxedAmount> for PriceValue {
    fn from(taxed: TaxedAmount) -> Self {
        PriceValue::TaxedAmount(taxed)
    }
}

impl From<TaxedAmountRange> for PriceValue {
    fn from(range: TaxedAmountRange) -> Self {
        PriceValue::TaxedAmountRange(range)
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Amount(amount) => fmt::Display::fmt(amount, f),
            PriceValue::AmountRange(range) => fmt::Display::fmt(range, f),
            PriceValue::TaxedAmount(taxed) => fmt::Display::fmt(taxed, f),
            PriceValue::TaxedAmountRange(range) => fmt::Display::fmt(range, f),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
