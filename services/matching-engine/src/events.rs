//! Event structures for matching engine
//!
//! Every dispatch emits a sequence of structured events describing what it
//! did. Rendering and analysis consume these after the dispatch returns.

use serde::{Deserialize, Serialize};
use types::errors::ValidationError;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::{OrderKind, Side};
use types::trade::Trade;

use crate::book::RestingEntry;

/// Why volume left the engine without trading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelReason {
    /// Market remainder with no counterparty under the cancel policy
    NoLiquidity,
}

/// Structured engine event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    OrderAccepted {
        order_id: OrderId,
        kind: OrderKind,
        side: Side,
        price: Price,
        volume: Volume,
    },
    TradeExecuted {
        trade: Trade,
    },
    OrderRested {
        side: Side,
        entry: RestingEntry,
    },
    OrderCanceled {
        order_id: OrderId,
        volume: Volume,
        reason: CancelReason,
    },
    OrderRejected {
        order_id: OrderId,
        reason: String,
    },
}

impl EngineEvent {
    pub fn rejected(err: &ValidationError) -> Self {
        EngineEvent::OrderRejected {
            order_id: err.order_id(),
            reason: err.to_string(),
        }
    }

    /// Order the event refers to
    pub fn order_id(&self) -> OrderId {
        match self {
            EngineEvent::OrderAccepted { order_id, .. }
            | EngineEvent::OrderCanceled { order_id, .. }
            | EngineEvent::OrderRejected { order_id, .. } => *order_id,
            EngineEvent::OrderRested { entry, .. } => entry.order_id,
            EngineEvent::TradeExecuted { trade } => match trade.aggressor_side {
                Side::BUY => trade.bid_order_id,
                Side::SELL => trade.ask_order_id,
            },
        }
    }
}
