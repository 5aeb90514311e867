//! # Pricing Configuration
//!
//! Default rounding modes and per-currency precision overrides.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     PRICETAG_ROUNDING=half_even                                         │
//! │     PRICETAG_TAX_ROUNDING=up                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     pricing.toml (path supplied by the caller)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     half_up everywhere, ISO 4217 precision                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [rounding]
//! mode = "half_even"   # used by PricingConfig::quantize
//! tax = "up"           # used by PricingConfig::flat_tax
//!
//! [precision]
//! overrides = { JPY = 2, BHD = 2 }
//! ```

use pricetag_currency::{validate_currency, CurrencyCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult, PriceError, PriceResult};
use crate::price::PriceValue;
use crate::rounding::Rounding;
use crate::tax::{flat_tax_with_precision, TaxRate};

/// Environment variable overriding [`RoundingSettings::mode`].
pub const ENV_ROUNDING: &str = "PRICETAG_ROUNDING";

/// Environment variable overriding [`RoundingSettings::tax`].
pub const ENV_TAX_ROUNDING: &str = "PRICETAG_TAX_ROUNDING";

/// Largest scale a `Decimal` can carry.
const MAX_PRECISION: u32 = 28;

// =============================================================================
// Settings Sections
// =============================================================================

/// `[rounding]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundingSettings {
    /// Rounding used when quantizing prices.
    #[serde(default)]
    pub mode: Rounding,

    /// Rounding used for the computed side of a flat tax.
    #[serde(default)]
    pub tax: Rounding,
}

/// `[precision]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrecisionSettings {
    /// Fraction digits by currency code, replacing the ISO 4217 value.
    #[serde(default)]
    pub overrides: BTreeMap<String, u32>,
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete pricing configuration.
///
/// ## Example
/// ```rust
/// use pricetag_core::{Amount, PricingConfig, PriceValue};
/// use rust_decimal_macros::dec;
///
/// let config = PricingConfig::from_toml_str(r#"
///     [rounding]
///     mode = "down"
///
///     [precision]
///     overrides = { JPY = 2 }
/// "#).unwrap();
///
/// let yen = PriceValue::from(Amount::new(dec!(45.678), "JPY").unwrap());
/// let rounded = config.quantize(&yen).unwrap();
/// assert_eq!(rounded.as_amount().unwrap().value(), dec!(45.67));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub rounding: RoundingSettings,

    #[serde(default)]
    pub precision: PrecisionSettings,
}

impl PricingConfig {
    /// Creates a config with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, when `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(path)?;
                config = Self::parse_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config = Self::parse_toml(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for (code, digits) in &self.precision.overrides {
            validate_currency(code).map_err(PriceError::from)?;

            if *digits > MAX_PRECISION {
                return Err(ConfigError::Invalid(format!(
                    "precision for {} must be at most {}, got {}",
                    code, MAX_PRECISION, digits
                )));
            }
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup, e.g. a map in tests.
    ///
    /// Unparseable rounding names are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_ROUNDING) {
            match mode.parse::<Rounding>() {
                Ok(parsed) => {
                    debug!(mode = %parsed, "Overriding rounding mode from environment");
                    self.rounding.mode = parsed;
                }
                Err(e) => warn!(mode = %mode, error = %e, "Ignoring rounding override"),
            }
        }

        if let Some(mode) = lookup(ENV_TAX_ROUNDING) {
            match mode.parse::<Rounding>() {
                Ok(parsed) => {
                    debug!(mode = %parsed, "Overriding tax rounding mode from environment");
                    self.rounding.tax = parsed;
                }
                Err(e) => warn!(mode = %mode, error = %e, "Ignoring tax rounding override"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Fraction digits for `currency`: the override if one is set, else ISO 4217.
    pub fn precision_for(&self, currency: CurrencyCode) -> u32 {
        self.precision
            .overrides
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(currency.as_str()))
            .map(|(_, digits)| *digits)
            .unwrap_or_else(|| currency.fraction_digits())
    }

    /// Quantizes `value` with the configured mode and precision.
    pub fn quantize(&self, value: &PriceValue) -> PriceResult<PriceValue> {
        let precision = self.precision_for(value.currency());
        value.quantize(self.rounding.mode, Some(precision))
    }

    /// Applies a flat tax with the configured tax rounding and precision.
    pub fn flat_tax(
        &self,
        value: &PriceValue,
        rate: TaxRate,
        keep_gross: bool,
    ) -> PriceResult<PriceValue> {
        let precision = self.precision_for(value.currency());
        flat_tax_with_precision(value, rate, keep_gross, self.rounding.tax, Some(precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn price(value: rust_decimal::Decimal, currency: &str) -> PriceValue {
        Amount::new(value, currency).unwrap().into()
    }

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.rounding.mode, Rounding::HalfUp);
        assert_eq!(config.rounding.tax, Rounding::HalfUp);
        assert!(config.precision.overrides.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = PricingConfig::from_toml_str(
            r#"
            [rounding]
            mode = "half_even"
            tax = "up"

            [precision]
            overrides = { JPY = 2 }
            "#,
        )
        .unwrap();

        assert_eq!(config.rounding.mode, Rounding::HalfEven);
        assert_eq!(config.rounding.tax, Rounding::Up);
        assert_eq!(config.precision.overrides.get("JPY"), Some(&2));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = PricingConfig::from_toml_str("[rounding]\nmode = \"floor\"\n").unwrap();
        assert_eq!(config.rounding.mode, Rounding::Floor);
        assert_eq!(config.rounding.tax, Rounding::HalfUp);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PricingConfig::from_toml_str("[rounding]\nmode = \"sideways\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PricingConfig::from_toml_str("[precision]\noverrides = { XYZ = 2 }\n"),
            Err(ConfigError::Price(PriceError::UnknownCurrency(_)))
        ));
        assert!(matches!(
            PricingConfig::from_toml_str("[precision]\noverrides = { USD = 40 }\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = PricingConfig::default();
        config.precision.overrides.insert("JPY".to_string(), 2);

        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[rounding]"));
        assert!(toml_str.contains("half_up"));

        assert_eq!(PricingConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let env: HashMap<&str, &str> = [(ENV_ROUNDING, "ROUND_DOWN"), (ENV_TAX_ROUNDING, "bogus")]
            .into_iter()
            .collect();

        let mut config = PricingConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.rounding.mode, Rounding::Down);
        // Unparseable values are ignored.
        assert_eq!(config.rounding.tax, Rounding::HalfUp);
    }

    #[test]
    fn test_precision_for() {
        let config = PricingConfig::from_toml_str("[precision]\noverrides = { jpy = 2 }\n").unwrap();
        let jpy = CurrencyCode::parse("JPY").unwrap();
        let usd = CurrencyCode::parse("USD").unwrap();
        assert_eq!(config.precision_for(jpy), 2);
        assert_eq!(config.precision_for(usd), 2);
        assert_eq!(PricingConfig::default().precision_for(jpy), 0);
    }

    #[test]
    fn test_quantize_uses_configured_mode() {
        let mut config = PricingConfig::default();
        let value = price(dec!(2.345), "USD");
        assert_eq!(config.quantize(&value).unwrap().as_amount().unwrap().value(), dec!(2.35));

        config.rounding.mode = Rounding::HalfEven;
        assert_eq!(config.quantize(&value).unwrap().as_amount().unwrap().value(), dec!(2.34));
    }

    #[test]
    fn test_flat_tax_uses_tax_rounding_and_precision() {
        let mut config = PricingConfig::default();
        config.rounding.tax = Rounding::Down;
        config.precision.overrides.insert("JPY".to_string(), 1);

        let yen = price(dec!(100), "JPY");
        let taxed = config.flat_tax(&yen, TaxRate::from_bps(825), false).unwrap();
        // 100 × 1.0825 = 108.25 → one digit, rounded down
        assert_eq!(taxed.as_taxed_amount().unwrap().gross().value(), dec!(108.2));
    }

    #[test]
    fn test_load_and_save() {
        let dir = std::env::temp_dir().join(format!("pricetag-config-{}", std::process::id()));
        let path = dir.join("pricing.toml");

        let mut config = PricingConfig::default();
        config.rounding.mode = Rounding::Ceiling;
        config.precision.overrides.insert("BHD".to_string(), 2);
        config.save(&path).unwrap();

        let loaded = PricingConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.precision, config.precision);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("pricetag-does-not-exist.toml");
        let config = PricingConfig::load_or_default(Some(&path));
        assert!(config.precision.overrides.is_empty());
    }
}
