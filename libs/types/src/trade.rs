//! Trade records
//!
//! A trade is written once per execution step and never mutated.

use crate::ids::{OrderId, TradeSequence};
use crate::numeric::{Price, Volume};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a trade consumed all of one side's remaining volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillStatus {
    /// Entire remaining volume was consumed
    FILL,
    /// Only part of the remaining volume was consumed
    PART,
}

impl FillStatus {
    /// Tag for a side that has `after` units left once the trade is applied
    pub fn from_remaining(after: Volume) -> Self {
        if after == 0 {
            FillStatus::FILL
        } else {
            FillStatus::PART
        }
    }
}

impl fmt::Display for FillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStatus::FILL => f.write_str("FILL"),
            FillStatus::PART => f.write_str("PART"),
        }
    }
}

/// Executed trade between one bid and one ask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub sequence: TradeSequence,
    pub price: Price,
    pub volume: Volume,
    pub bid_order_id: OrderId,
    pub bid_status: FillStatus,
    pub ask_order_id: OrderId,
    pub ask_status: FillStatus,
    /// Side of the incoming order that caused the trade
    pub aggressor_side: Side,
}

impl Trade {
    /// Calculate trade value (price × volume)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * Decimal::from(self.volume)
    }

    /// Check whether the given order took part in this trade
    pub fn involves(&self, order_id: OrderId) -> bool {
        self.bid_order_id == order_id || self.ask_order_id == order_id
    }

    /// Id of the resting side
    pub fn maker_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::BUY => self.ask_order_id,
            Side::SELL => self.bid_order_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trade {
        Trade {
            sequence: 1,
            price: Price::from_u64(100),
            volume: 5,
            bid_order_id: OrderId::new(1),
            bid_status: FillStatus::FILL,
            ask_order_id: OrderId::new(2),
            ask_status: FillStatus::PART,
            aggressor_side: Side::SELL,
        }
    }

    #[test]
    fn test_fill_status_from_remaining() {
        assert_eq!(FillStatus::from_remaining(0), FillStatus::FILL);
        assert_eq!(FillStatus::from_remaining(3), FillStatus::PART);
    }

    #[test]
    fn test_trade_notional() {
        assert_eq!(sample().notional(), Decimal::from(500));
    }

    #[test]
    fn test_trade_participants() {
        let trade = sample();
        assert!(trade.involves(OrderId::new(1)));
        assert!(trade.involves(OrderId::new(2)));
        assert!(!trade.involves(OrderId::new(3)));
        assert_eq!(trade.maker_order_id(), OrderId::new(1));
    }

    #[test]
    fn test_fill_status_serialization() {
        assert_eq!(serde_json::to_string(&FillStatus::PART).unwrap(), "\"PART\"");
    }
}
