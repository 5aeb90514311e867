//! # pricetag-core: Currency-Aware Price Arithmetic
//!
//! Exact decimal prices tagged with ISO 4217 currencies, in four shapes:
//! single amounts, ranges, net/gross taxed amounts, and ranges of taxed
//! amounts. Every operation is pure and returns a typed error instead of
//! panicking.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pricetag Workspace                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ pricetag-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │  amount   │  │   range   │  │   taxed   │  │taxed_range│    │   │
//! │  │   │  Amount   │  │AmountRange│  │TaxedAmount│  │TaxedAmount│    │   │
//! │  │   │           │  │           │  │           │  │   Range   │    │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │   price   │  │ discount  │  │    tax    │  │  config   │    │   │
//! │  │   │PriceValue │  │Discountable│ │  TaxRate  │  │ Pricing   │    │   │
//! │  │   │quantize_any│ │ Discount  │  │ flat_tax  │  │  Config   │    │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pricetag-currency (ISO 4217 registry)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`amount`] - Amount type: non-negative decimal + currency
//! - [`range`] - Closed ranges of amounts
//! - [`taxed`] - Net/gross pairs
//! - [`taxed_range`] - Closed ranges of net/gross pairs
//! - [`price`] - Sum type over the four kinds, generic quantize
//! - [`discount`] - Fixed, fractional and percentage discounts
//! - [`tax`] - Tax rates and flat tax
//! - [`rounding`] - Rounding modes
//! - [`config`] - TOML/env configuration
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Exact Decimals**: `rust_decimal::Decimal`, never floats
//! 2. **Immutable Values**: every operation returns a new value
//! 3. **Currency Checked**: mixing currencies is an error, not a conversion
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pricetag_core::{percentage_discount, Amount, PriceValue, Rounding, TaxedAmount};
//! use rust_decimal_macros::dec;
//!
//! let net = Amount::new(dec!(100), "EUR").unwrap();
//! let gross = Amount::new(dec!(123), "EUR").unwrap();
//! let price = PriceValue::from(TaxedAmount::new(net, gross).unwrap());
//!
//! // 10% off the gross price, taken off net and gross alike
//! let sale = percentage_discount(&price, 10, true).unwrap();
//! let sale = sale.as_taxed_amount().unwrap();
//! assert_eq!(sale.net().value(), dec!(87.70));
//! assert_eq!(sale.gross().value(), dec!(110.70));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod config;
pub mod discount;
pub mod error;
pub mod price;
pub mod range;
pub mod rounding;
pub mod tax;
pub mod taxed;
pub mod taxed_range;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricetag_core::Amount` instead of
// `use pricetag_core::amount::Amount`

pub use amount::Amount;
pub use config::{PrecisionSettings, PricingConfig, RoundingSettings};
pub use discount::{fixed_discount, fractional_discount, percentage_discount, Discount, Discountable};
pub use error::{ConfigError, ConfigResult, PriceError, PriceResult};
pub use price::{quantize_any, PriceValue};
pub use range::AmountRange;
pub use rounding::Rounding;
pub use tax::{flat_tax, TaxRate};
pub use taxed::TaxedAmount;
pub use taxed_range::TaxedAmountRange;

pub use pricetag_currency::{fraction_digits, validate_currency, CurrencyCode, CurrencyInfo};
