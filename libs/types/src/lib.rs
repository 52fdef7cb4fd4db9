//! Types library for the double-auction matching engine
//!
//! Shared type definitions between the order feed, the matching core and
//! any downstream consumer of trades and book state.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, TradeSequence)
//! - `numeric`: Decimal price and integer volume types
//! - `order`: Order kinds, sides, typed orders and raw feed records
//! - `trade`: Trade records and fill tags
//! - `errors`: Validation error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;
