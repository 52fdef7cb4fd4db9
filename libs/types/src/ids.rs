//! Identifier types
//!
//! Order ids are assigned by the feed, not by the engine. They double as the
//! time-priority tie-break, so a feed is expected to hand them out in
//! non-decreasing arrival order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned order identifier
///
/// Lower ids rank ahead of higher ids at equal price and kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a trade in the trade log
pub type TradeSequence = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_ordering_follows_raw_value() {
        assert!(OrderId::new(1) < OrderId::new(2));
        assert_eq!(OrderId::from(7).as_u64(), 7);
    }

    #[test]
    fn test_order_id_serializes_transparently() {
        let json = serde_json::to_string(&OrderId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: OrderId = serde_json::from_str("42").unwrap();
        assert_eq!(back, OrderId::new(42));
    }
}
