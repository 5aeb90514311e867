//! # Tax
//!
//! Tax rates in basis points and flat-rate taxation of any price kind.
//!
//! ## Flat Tax
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rate = 2300 bps (23%)                                                  │
//! │                                                                         │
//! │  keep_gross = false   base is NET                                       │
//! │    100.00 ──► net 100.00, gross quantize(100.00 × 1.23) = 123.00        │
//! │                                                                         │
//! │  keep_gross = true    base is GROSS                                     │
//! │    123.00 ──► net quantize(123.00 ÷ 1.23) = 100.00, gross 123.00        │
//! │                                                                         │
//! │  Amount           → TaxedAmount                                         │
//! │  TaxedAmount      → TaxedAmount       (re-taxed from net or gross)      │
//! │  AmountRange      → TaxedAmountRange  (both ends)                       │
//! │  TaxedAmountRange → TaxedAmountRange  (both ends)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;
use crate::error::{PriceError, PriceResult};
use crate::price::PriceValue;
use crate::rounding::Rounding;
use crate::taxed::TaxedAmount;
use crate::taxed_range::TaxedAmountRange;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25% (e.g., Texas sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, e.g. `dec!(8.25)`.
    ///
    /// Rejects negative rates and rates finer than one basis point.
    pub fn from_percentage(pct: Decimal) -> PriceResult<Self> {
        if pct < Decimal::ZERO {
            return Err(PriceError::NegativeAmount(pct));
        }
        let bps = pct
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::Overflow)?;
        if bps.fract() != Decimal::ZERO {
            return Err(PriceError::InvalidDecimal(pct.to_string()));
        }
        let bps = u32::try_from(bps.mantissa() / 10i128.pow(bps.scale()))
            .map_err(|_| PriceError::Overflow)?;
        Ok(TaxRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// The rate as a fraction: 825 bps → `0.0825`.
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.as_fraction()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.as_fraction() * Decimal::ONE_HUNDRED).normalize())
    }
}

// =============================================================================
// Flat Tax
// =============================================================================

/// Applies a flat tax rate to any price kind.
///
/// The computed side (gross, or net when `keep_gross`) is quantized to the
/// currency's precision with `rounding`; the given side is kept as is.
///
/// ## Example
/// ```rust
/// use pricetag_core::{flat_tax, Amount, PriceValue, Rounding, TaxRate};
/// use rust_decimal_macros::dec;
///
/// let price = PriceValue::from(Amount::new(dec!(10), "USD").unwrap());
/// let taxed = flat_tax(&price, TaxRate::from_bps(825), false, Rounding::HalfUp).unwrap();
///
/// let taxed = taxed.as_taxed_amount().unwrap();
/// assert_eq!(taxed.net().value(), dec!(10));
/// assert_eq!(taxed.gross().value(), dec!(10.83));
/// ```
pub fn flat_tax(
    base: &PriceValue,
    rate: TaxRate,
    keep_gross: bool,
    rounding: Rounding,
) -> PriceResult<PriceValue> {
    flat_tax_with_precision(base, rate, keep_gross, rounding, None)
}

/// [`flat_tax`] with an explicit precision for the computed side.
pub(crate) fn flat_tax_with_precision(
    base: &PriceValue,
    rate: TaxRate,
    keep_gross: bool,
    rounding: Rounding,
    precision: Option<u32>,
) -> PriceResult<PriceValue> {
    let tax = FlatTax {
        rate,
        keep_gross,
        rounding,
        precision,
    };
    let taxed: PriceValue = match base {
        PriceValue::Amount(amount) => tax.amount(amount)?.into(),
        PriceValue::TaxedAmount(taxed) => tax.retax(taxed)?.into(),
        PriceValue::AmountRange(range) => {
            TaxedAmountRange::new(tax.amount(&range.start())?, tax.amount(&range.stop())?)?.into()
        }
        PriceValue::TaxedAmountRange(range) => {
            TaxedAmountRange::new(tax.retax(&range.start())?, tax.retax(&range.stop())?)?.into()
        }
    };
    Ok(taxed)
}

struct FlatTax {
    rate: TaxRate,
    keep_gross: bool,
    rounding: Rounding,
    precision: Option<u32>,
}

impl FlatTax {
    fn amount(&self, base: &Amount) -> PriceResult<TaxedAmount> {
        let multiplier = self.rate.multiplier();
        if self.keep_gross {
            let net = base
                .divide(multiplier)?
                .quantize(self.rounding, self.precision);
            TaxedAmount::new(net, *base)
        } else {
            let gross = base
                .mul(multiplier)?
                .quantize(self.rounding, self.precision);
            TaxedAmount::new(*base, gross)
        }
    }

    fn retax(&self, taxed: &TaxedAmount) -> PriceResult<TaxedAmount> {
        let base = if self.keep_gross {
            taxed.gross()
        } else {
            taxed.net()
        };
        self.amount(&base)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
