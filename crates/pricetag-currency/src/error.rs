//! # Error Types
//!
//! Errors raised while resolving a currency code against the registry.
//!
//! ```text
//! "usd"   ──► validate ──► CurrencyCode(USD)
//! "US"    ──► validate ──► CurrencyError::Malformed
//! "ABC"   ──► validate ──► CurrencyError::Unknown
//! ```

use thiserror::Error;

/// Currency lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The input is not three ASCII letters.
    #[error("Malformed currency code: '{0}'")]
    Malformed(String),

    /// The input is well-formed but no ISO 4217 currency uses it.
    #[error("Unknown currency code: '{0}'")]
    Unknown(String),
}

impl CurrencyError {
    /// Returns the rejected input as the caller supplied it.
    pub fn input(&self) -> &str {
        match self {
            CurrencyError::Malformed(code) | CurrencyError::Unknown(code) => code,
        }
    }
}

/// Convenience type alias for Results with CurrencyError.
pub type CurrencyResult<T> = Result<T, CurrencyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CurrencyError::Unknown("ABC".to_string());
        assert_eq!(err.to_string(), "Unknown currency code: 'ABC'");

        let err = CurrencyError::Malformed("US".to_string());
        assert_eq!(err.to_string(), "Malformed currency code: 'US'");
        assert_eq!(err.input(), "US");
    }
}
