//! # Amount Module
//!
//! Provides the [`Amount`] type: a non-negative decimal value tagged with a
//! currency. Every other price type is built from amounts.
//!
//! ## Why Decimal + Currency?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE TWO WAYS MONEY MATH GOES WRONG                                     │
//! │                                                                         │
//! │  1. Binary floats:                                                      │
//! │       0.1 + 0.2 = 0.30000000000000004  ❌                               │
//! │                                                                         │
//! │  2. Mixing units:                                                       │
//! │       10 USD + 10 EUR = 20 ???          ❌                              │
//! │                                                                         │
//! │  OUR SOLUTION                                                           │
//! │    value:    rust_decimal::Decimal  (exact base-10)                     │
//! │    currency: CurrencyCode           (checked on every operation)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricetag_core::{Amount, Rounding};
//! use rust_decimal_macros::dec;
//!
//! let price = Amount::new(dec!(34.497), "usd").unwrap();
//! assert_eq!(price.quantize(Rounding::Up, None).value(), dec!(34.50));
//!
//! let total = price.add(&Amount::new(dec!(0.503), "USD").unwrap()).unwrap();
//! assert_eq!(total.value(), dec!(35));
//! ```

use pricetag_currency::{validate_currency, CurrencyCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::discount::Discountable;
use crate::error::{PriceError, PriceResult};
use crate::rounding::Rounding;

// =============================================================================
// Amount Type
// =============================================================================

/// A non-negative decimal value in a single currency.
///
/// ## Design Decisions
/// - **Immutable**: every operation returns a new `Amount`
/// - **Copy**: a `Decimal` plus a pointer-sized [`CurrencyCode`]
/// - **Validated**: construction rejects unknown currencies and negative values;
///   deserialization goes through the same checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AmountRepr")]
pub struct Amount {
    value: Decimal,
    currency: CurrencyCode,
}

#[derive(Deserialize)]
struct AmountRepr {
    value: Decimal,
    currency: CurrencyCode,
}

impl TryFrom<AmountRepr> for Amount {
    type Error = PriceError;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        Amount::with_code(repr.value, repr.currency)
    }
}

impl Amount {
    /// Creates an amount, validating and normalizing the currency code.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, PriceError};
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Amount::new(dec!(12.34), "usd").unwrap();
    /// assert_eq!(price.currency().as_str(), "USD");
    ///
    /// assert!(matches!(Amount::new(dec!(1), "XYZ"), Err(PriceError::UnknownCurrency(_))));
    /// assert!(matches!(Amount::new(dec!(-1), "USD"), Err(PriceError::NegativeAmount(_))));
    /// ```
    pub fn new(value: Decimal, currency: &str) -> PriceResult<Self> {
        let currency = validate_currency(currency)?;
        Self::with_code(value, currency)
    }

    /// Creates an amount from an already validated currency code.
    pub fn with_code(value: Decimal, currency: CurrencyCode) -> PriceResult<Self> {
        if value < Decimal::ZERO {
            return Err(PriceError::NegativeAmount(value));
        }
        Ok(Amount { value, currency })
    }

    /// Parses a decimal literal such as `"23.45"` into an amount.
    pub fn parse(value: &str, currency: &str) -> PriceResult<Self> {
        let currency = validate_currency(currency)?;
        let parsed = Decimal::from_str(value.trim())
            .map_err(|_| PriceError::InvalidDecimal(value.to_string()))?;
        Self::with_code(parsed, currency)
    }

    /// A zero amount in the given currency.
    #[inline]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Amount {
            value: Decimal::ZERO,
            currency,
        }
    }

    /// The decimal value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// The currency.
    #[inline]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Fails with `CurrencyMismatch` unless both amounts share a currency.
    pub(crate) fn same_currency(&self, other: &Amount) -> PriceResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(PriceError::mismatch(self.currency, other.currency))
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Adds two amounts of the same currency.
    pub fn add(&self, other: &Amount) -> PriceResult<Amount> {
        self.same_currency(other)?;
        let value = self
            .value
            .checked_add(other.value)
            .ok_or(PriceError::Overflow)?;
        Ok(Amount {
            value,
            currency: self.currency,
        })
    }

    /// Subtracts `other` from this amount.
    ///
    /// A result below zero is rejected with `NegativeAmount`; use
    /// [`Discountable::apply_fixed_discount`] for floor-at-zero semantics.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, PriceError};
    /// use rust_decimal_macros::dec;
    ///
    /// let ten = Amount::new(dec!(10), "USD").unwrap();
    /// let three = Amount::new(dec!(3), "USD").unwrap();
    /// assert_eq!(ten.sub(&three).unwrap().value(), dec!(7));
    /// assert!(matches!(three.sub(&ten), Err(PriceError::NegativeAmount(_))));
    /// ```
    pub fn sub(&self, other: &Amount) -> PriceResult<Amount> {
        self.same_currency(other)?;
        let value = self
            .value
            .checked_sub(other.value)
            .ok_or(PriceError::Overflow)?;
        Amount::with_code(value, self.currency)
    }

    /// Multiplies the value by a scalar.
    ///
    /// A negative factor would produce a negative amount and is rejected.
    pub fn mul(&self, factor: impl Into<Decimal>) -> PriceResult<Amount> {
        let value = self
            .value
            .checked_mul(factor.into())
            .ok_or(PriceError::Overflow)?;
        Amount::with_code(value, self.currency)
    }

    /// Divides the value by a positive scalar.
    pub fn divide(&self, divisor: impl Into<Decimal>) -> PriceResult<Amount> {
        let divisor = divisor.into();
        if divisor.is_zero() {
            return Err(PriceError::DivideByZero);
        }
        if divisor < Decimal::ZERO {
            return Err(PriceError::NegativeDivisor(divisor));
        }
        let value = self
            .value
            .checked_div(divisor)
            .ok_or(PriceError::Overflow)?;
        Amount::with_code(value, self.currency)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Orders two amounts of the same currency by value.
    ///
    /// Amounts in different currencies are not comparable: `CurrencyMismatch`.
    pub fn compare(&self, other: &Amount) -> PriceResult<Ordering> {
        self.same_currency(other)?;
        Ok(self.value.cmp(&other.value))
    }

    /// Numeric equality (`1.0 USD` equals `1.00 USD`).
    pub fn equal(&self, other: &Amount) -> PriceResult<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    pub fn less_than(&self, other: &Amount) -> PriceResult<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn less_than_or_equal(&self, other: &Amount) -> PriceResult<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn greater_than(&self, other: &Amount) -> PriceResult<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    /// Rounds the value to a fixed number of fraction digits.
    ///
    /// `precision = None` uses the currency's minor-unit digits (2 for USD,
    /// 0 for JPY). The result always carries exactly that many digits, so
    /// `45 USD` quantizes to `45.00 USD`.
    ///
    /// ## Example
    /// ```rust
    /// use pricetag_core::{Amount, Rounding};
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Amount::new(dec!(20.145), "USD").unwrap();
    /// assert_eq!(price.quantize(Rounding::HalfEven, None).value(), dec!(20.14));
    /// assert_eq!(price.quantize(Rounding::Down, Some(1)).value(), dec!(20.1));
    /// ```
    pub fn quantize(&self, rounding: Rounding, precision: Option<u32>) -> Amount {
        let digits = precision.unwrap_or_else(|| self.currency.fraction_digits());
        let mut value = self.value.round_dp_with_strategy(digits, rounding.strategy());
        value.rescale(digits);
        Amount {
            value,
            currency: self.currency,
        }
    }
}

// =============================================================================
// Discounts
// =============================================================================

impl Discountable for Amount {
    /// `self - discount`, floored at zero in the same currency.
    fn apply_fixed_discount(&self, discount: &Amount) -> PriceResult<Amount> {
        self.same_currency(discount)?;
        let remaining = self
            .value
            .checked_sub(discount.value)
            .ok_or(PriceError::Overflow)?;

        if remaining > Decimal::ZERO {
            return Ok(Amount {
                value: remaining,
                currency: self.currency,
            });
        }

        debug!(
            value = %self.value,
            discount = %discount.value,
            currency = %self.currency,
            "Discount covers the whole amount, clamping to zero"
        );
        Ok(Amount::zero(self.currency))
    }

    /// Discounts `quantize(self * fraction, Down)`.
    ///
    /// A bare amount has no net/gross split, so `from_gross` is ignored.
    fn apply_fractional_discount(&self, fraction: Decimal, _from_gross: bool) -> PriceResult<Amount> {
        let discount = self.mul(fraction)?.quantize(Rounding::Down, None);
        self.apply_fixed_discount(&discount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style representation: `Amount{12.34, USD}`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount{{{}, {}}}", self.value, self.currency)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
