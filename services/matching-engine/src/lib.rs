//! Matching Engine Service
//!
//! Continuous double-auction matching for a single instrument. Orders arrive
//! one at a time, cross against the opposite book under price/time priority
//! and leave any remainder resting on their own side.
//!
//! **Key Invariants:**
//! - Bids ordered by (kind desc, price desc, id asc), asks by
//!   (kind desc, price asc, id asc)
//! - Exactly one trade per execution step
//! - Conservation of volume
//! - No crossed book left behind by a limit order

pub mod book;
pub mod config;
pub mod engine;
pub mod events;
pub mod matching;
pub mod shared;
pub mod trade_log;
pub mod validator;

pub use config::{EngineConfig, MarketRemainderPolicy};
pub use engine::{BookSnapshot, EngineError, FeedSummary, MatchingEngine, OrderOutcome};
pub use events::EngineEvent;
pub use shared::SharedEngine;
pub use trade_log::TradeLog;
