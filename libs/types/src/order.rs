//! Order types
//!
//! `OrderRequest` is the raw five-field record the feed delivers, with kind
//! and side still encoded as the feed's numeric codes. `Order` is the typed
//! form the matching core works with, obtained through validation.

use crate::errors::ValidationError;
use crate::ids::OrderId;
use crate::numeric::{Price, Volume};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Feed code for a buy order
    pub const BUY_CODE: u8 = 1;
    /// Feed code for a sell order
    pub const SELL_CODE: u8 = 2;

    /// Decode a feed side code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::BUY_CODE => Some(Side::BUY),
            Self::SELL_CODE => Some(Side::SELL),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Side::BUY => Self::BUY_CODE,
            Side::SELL => Self::SELL_CODE,
        }
    }
}

/// Order kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Trades only at its limit price or better
    LIMIT,
    /// Trades at whatever the opposite book offers; carries no price
    MARKET,
}

impl OrderKind {
    /// Feed code for a limit order
    pub const LIMIT_CODE: u8 = 1;
    /// Feed code for a market order
    pub const MARKET_CODE: u8 = 2;

    /// Decode a feed kind code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::LIMIT_CODE => Some(OrderKind::LIMIT),
            Self::MARKET_CODE => Some(OrderKind::MARKET),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            OrderKind::LIMIT => Self::LIMIT_CODE,
            OrderKind::MARKET => Self::MARKET_CODE,
        }
    }

    /// Book priority rank; higher ranks sit closer to the head of a book.
    ///
    /// Equal to the feed code, so MARKET ranks ahead of LIMIT.
    pub fn priority_rank(&self) -> u8 {
        self.code()
    }
}

/// Raw order record as delivered by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub kind: u8,
    pub side: u8,
    pub price: Decimal,
    pub volume: Volume,
    pub id: u64,
}

impl OrderRequest {
    pub fn new(kind: u8, side: u8, price: Decimal, volume: Volume, id: u64) -> Self {
        Self {
            kind,
            side,
            price,
            volume,
            id,
        }
    }

    /// Build a limit request from typed parts
    pub fn limit(side: Side, price: Price, volume: Volume, id: u64) -> Self {
        Self::new(OrderKind::LIMIT_CODE, side.code(), price.as_decimal(), volume, id)
    }

    /// Build a market request from typed parts
    pub fn market(side: Side, volume: Volume, id: u64) -> Self {
        Self::new(OrderKind::MARKET_CODE, side.code(), Decimal::ZERO, volume, id)
    }
}

impl TryFrom<OrderRequest> for Order {
    type Error = ValidationError;

    /// Kind is checked before side.
    fn try_from(request: OrderRequest) -> Result<Self, Self::Error> {
        let order_id = OrderId::new(request.id);
        let kind = OrderKind::from_code(request.kind).ok_or(ValidationError::UndefinedOrderType {
            order_id,
            code: request.kind,
        })?;
        let side = Side::from_code(request.side).ok_or(ValidationError::UndefinedOrderSide {
            order_id,
            code: request.side,
        })?;

        Ok(Order::new(order_id, kind, side, Price::new(request.price), request.volume))
    }
}

/// Typed order carried through the matching core
///
/// `remaining_volume` is decremented in place as the order fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    pub side: Side,
    pub price: Price,
    pub remaining_volume: Volume,
}

impl Order {
    pub fn new(id: OrderId, kind: OrderKind, side: Side, price: Price, volume: Volume) -> Self {
        Self {
            id,
            kind,
            side,
            price,
            remaining_volume: volume,
        }
    }

    pub fn limit(id: u64, side: Side, price: Price, volume: Volume) -> Self {
        Self::new(OrderId::new(id), OrderKind::LIMIT, side, price, volume)
    }

    pub fn market(id: u64, side: Side, volume: Volume) -> Self {
        Self::new(OrderId::new(id), OrderKind::MARKET, side, Price::zero(), volume)
    }

    /// Check if no volume is left to match or rest
    pub fn is_filled(&self) -> bool {
        self.remaining_volume == 0
    }

    /// Consume `volume` units
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining volume
    pub fn fill(&mut self, volume: Volume) {
        assert!(volume <= self.remaining_volume, "Fill would exceed remaining volume");
        self.remaining_volume -= volume;
    }
}
