//! Decimal prices and integer volumes
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Volumes are whole units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of units on an order, resting entry or trade
pub type Volume = u64;

/// Limit price of an order, or execution price of a trade
///
/// Market orders carry `Price::zero()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ordering_is_numeric() {
        let low = Price::from_str("99.5").unwrap();
        let high = Price::from_u64(100);
        assert!(low < high);
        assert_eq!(low.min(high), low);
    }

    #[test]
    fn test_price_equality_ignores_scale() {
        assert_eq!(Price::from_str("100.00").unwrap(), Price::from_u64(100));
    }

    #[test]
    fn test_zero_price() {
        assert!(Price::zero().is_zero());
        assert!(!Price::from_u64(1).is_zero());
    }
}
