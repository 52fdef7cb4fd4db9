//! Engine configuration

use serde::{Deserialize, Serialize};
use types::ids::TradeSequence;

/// What happens to a market order's volume that finds no counterparty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRemainderPolicy {
    /// Rest the remainder on its own book at price zero, ahead of all limit
    /// entries on that side
    #[default]
    Rest,
    /// Drop the remainder and report it as canceled
    Cancel,
}

/// Configuration for the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub market_remainder: MarketRemainderPolicy,
    /// Sequence given to the first trade
    pub starting_sequence: TradeSequence,
    /// Queue structured events for [`crate::MatchingEngine::drain_events`]
    pub emit_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            market_remainder: MarketRemainderPolicy::Rest,
            starting_sequence: 1,
            emit_events: true,
        }
    }
}
