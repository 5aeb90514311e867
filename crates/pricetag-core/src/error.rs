//! # Error Types
//!
//! Domain-specific error types for pricetag-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricetag-currency                                                      │
//! │  └── CurrencyError    - malformed / unknown ISO code                    │
//! │           │                                                             │
//! │           ▼ From                                                        │
//! │  pricetag-core (this file)                                              │
//! │  ├── PriceError       - every value-type operation                      │
//! │  └── ConfigError      - loading / validating PricingConfig              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending values in the message (currencies, amounts)
//! 3. Errors are enum variants, never String
//! 4. Composite operations stop at the first component error

use pricetag_currency::{CurrencyCode, CurrencyError};
use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Price Error
// =============================================================================

/// Errors raised by amount, range and taxed-amount operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The currency code is malformed or not in the registry.
    #[error("Unknown currency: '{0}'")]
    UnknownCurrency(String),

    /// Two operands carry different currencies.
    ///
    /// ## When This Occurs
    /// - Adding, subtracting or comparing amounts of different currencies
    /// - Building a taxed amount from a USD net and an EUR gross
    /// - Applying a EUR discount to a USD price
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        left: CurrencyCode,
        right: CurrencyCode,
    },

    /// An amount would hold a value below zero.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// A range's ends are out of order or in different currencies.
    #[error("Invalid range: {reason}")]
    InvalidRange { reason: String },

    /// Division by a zero scalar.
    #[error("Cannot divide by zero")]
    DivideByZero,

    /// Division by a negative scalar.
    #[error("Cannot divide by a negative number: {0}")]
    NegativeDivisor(Decimal),

    /// A rounding mode name could not be parsed.
    #[error("Invalid rounding mode: '{0}'")]
    InvalidRoundingMode(String),

    /// A required input is absent (e.g. an empty list of amounts).
    #[error("Missing operand: {operand}")]
    MissingOperand { operand: String },

    /// The operand kind is not accepted by the operation.
    #[error("Cannot {operation} {operand} to/from {base}")]
    UnsupportedOperandType {
        operation: &'static str,
        base: &'static str,
        operand: &'static str,
    },

    /// A decimal literal could not be parsed.
    #[error("Invalid decimal value: '{0}'")]
    InvalidDecimal(String),

    /// Decimal arithmetic exceeded the representable range.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl PriceError {
    pub(crate) fn mismatch(left: CurrencyCode, right: CurrencyCode) -> Self {
        PriceError::CurrencyMismatch { left, right }
    }

    pub(crate) fn invalid_range(reason: impl Into<String>) -> Self {
        PriceError::InvalidRange {
            reason: reason.into(),
        }
    }
}

impl From<CurrencyError> for PriceError {
    fn from(err: CurrencyError) -> Self {
        PriceError::UnknownCurrency(err.input().to_string())
    }
}

/// Convenience type alias for Results with PriceError.
pub type PriceResult<T> = Result<T, PriceError>;

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading or validating a [`crate::config::PricingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but breaks a rule.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// A value was rejected by the price domain (unknown currency, bad rounding).
    #[error("Invalid config value: {0}")]
    Price(#[from] PriceError),
}

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
