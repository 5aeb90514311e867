//! # Rounding Modes
//!
//! How [`crate::Amount::quantize`] resolves digits beyond the target
//! precision.
//!
//! ```text
//! ┌────────────┬──────────────────────────┬─────────┬─────────┐
//! │ mode       │ direction                │  1.231  │  1.235  │
//! ├────────────┼──────────────────────────┼─────────┼─────────┤
//! │ Up         │ away from zero           │  1.24   │  1.24   │
//! │ Down       │ toward zero              │  1.23   │  1.23   │
//! │ Ceiling    │ toward +∞                │  1.24   │  1.24   │
//! │ Floor      │ toward −∞                │  1.23   │  1.23   │
//! │ HalfUp     │ nearest, ties away       │  1.23   │  1.24   │
//! │ HalfEven   │ nearest, ties to even    │  1.23   │  1.24   │
//! └────────────┴──────────────────────────┴─────────┴─────────┘
//! ```
//!
//! Amounts are never negative, so `Up`/`Ceiling` and `Down`/`Floor` agree on
//! every valid amount; they differ only on intermediate negative decimals.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PriceError;

/// Rounding mode used when quantizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Away from zero.
    Up,
    /// Toward zero (truncate).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To nearest, ties away from zero.
    #[default]
    HalfUp,
    /// To nearest, ties to the even neighbour (bankers rounding).
    HalfEven,
}

impl Rounding {
    /// The equivalent `rust_decimal` strategy.
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Rounding::Floor => RoundingStrategy::ToNegativeInfinity,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rounding::Up => write!(f, "up"),
            Rounding::Down => write!(f, "down"),
            Rounding::Ceiling => write!(f, "ceiling"),
            Rounding::Floor => write!(f, "floor"),
            Rounding::HalfUp => write!(f, "half_up"),
            Rounding::HalfEven => write!(f, "half_even"),
        }
    }
}

impl FromStr for Rounding {
    type Err = PriceError;

    /// Accepts `up`, `down`, `ceiling`, `floor`, `half_up`, `half_even`,
    /// in any case and optionally prefixed with `round_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower.strip_prefix("round_").unwrap_or(&lower);
        match name {
            "up" => Ok(Rounding::Up),
            "down" => Ok(Rounding::Down),
            "ceiling" => Ok(Rounding::Ceiling),
            "floor" => Ok(Rounding::Floor),
            "half_up" => Ok(Rounding::HalfUp),
            "half_even" => Ok(Rounding::HalfEven),
            _ => Err(PriceError::InvalidRoundingMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse() {
        assert_eq!("up".parse::<Rounding>().unwrap(), Rounding::Up);
        assert_eq!("DOWN".parse::<Rounding>().unwrap(), Rounding::Down);
        assert_eq!("ROUND_CEILING".parse::<Rounding>().unwrap(), Rounding::Ceiling);
        assert_eq!("round_floor".parse::<Rounding>().unwrap(), Rounding::Floor);
        assert_eq!("half_even".parse::<Rounding>().unwrap(), Rounding::HalfEven);
        assert_eq!(
            "sideways".parse::<Rounding>(),
            Err(PriceError::InvalidRoundingMode("sideways".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in [
            Rounding::Up,
            Rounding::Down,
            Rounding::Ceiling,
            Rounding::Floor,
            Rounding::HalfUp,
            Rounding::HalfEven,
        ] {
            assert_eq!(mode.to_string().parse::<Rounding>().unwrap(), mode);
        }
    }

    #[test]
    fn test_strategies_on_negative_values() {
        let value = dec!(-1.235);
        assert_eq!(value.round_dp_with_strategy(2, Rounding::Up.strategy()), dec!(-1.24));
        assert_eq!(value.round_dp_with_strategy(2, Rounding::Down.strategy()), dec!(-1.23));
        assert_eq!(value.round_dp_with_strategy(2, Rounding::Ceiling.strategy()), dec!(-1.23));
        assert_eq!(value.round_dp_with_strategy(2, Rounding::Floor.strategy()), dec!(-1.24));
    }

    #[test]
    fn test_default_is_half_up() {
        assert_eq!(Rounding::default(), Rounding::HalfUp);
    }
}
