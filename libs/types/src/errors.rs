//! Error types for order validation
//!
//! Validation is the only failure the matching core knows about. A rejected
//! order is dropped and the engine keeps processing the feed.

use crate::ids::OrderId;
use thiserror::Error;

/// Malformed order record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Undefined order type {code} on order {order_id}")]
    UndefinedOrderType { order_id: OrderId, code: u8 },

    #[error("Undefined order side {code} on order {order_id}")]
    UndefinedOrderSide { order_id: OrderId, code: u8 },
}

impl ValidationError {
    /// Id of the order that failed validation
    pub fn order_id(&self) -> OrderId {
        match self {
            ValidationError::UndefinedOrderType { order_id, .. }
            | ValidationError::UndefinedOrderSide { order_id, .. } => *order_id,
        }
    }
}
