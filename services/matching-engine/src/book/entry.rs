//! Resting entry stored on a book

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::{Order, OrderKind};

/// Unfilled volume of one order waiting on a book
///
/// Price and kind never change after insertion; only the volume is
/// decremented, which keeps the entry's priority stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingEntry {
    pub price: Price,
    pub remaining_volume: Volume,
    pub order_id: OrderId,
    pub kind: OrderKind,
}

impl RestingEntry {
    pub fn new(price: Price, remaining_volume: Volume, order_id: OrderId, kind: OrderKind) -> Self {
        Self {
            price,
            remaining_volume,
            order_id,
            kind,
        }
    }

    pub fn is_market(&self) -> bool {
        self.kind == OrderKind::MARKET
    }
}

impl From<&Order> for RestingEntry {
    fn from(order: &Order) -> Self {
        Self::new(order.price, order.remaining_volume, order.id, order.kind)
    }
}
