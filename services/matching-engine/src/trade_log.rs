//! Append-only trade log
//!
//! Every execution step appends exactly one trade. Sequences are assigned in
//! append order and never reused.

use types::ids::{OrderId, TradeSequence};
use types::numeric::Volume;
use types::trade::Trade;

/// Ordered record of executed trades
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    trades: Vec<Trade>,
    next_sequence: TradeSequence,
}

impl TradeLog {
    /// Create an empty log whose first trade gets `starting_sequence`
    pub fn new(starting_sequence: TradeSequence) -> Self {
        Self {
            trades: Vec::new(),
            next_sequence: starting_sequence,
        }
    }

    /// Sequence the next appended trade must carry
    pub fn next_sequence(&self) -> TradeSequence {
        self.next_sequence
    }

    /// Append a trade built with [`TradeLog::next_sequence`]
    pub fn append(&mut self, trade: Trade) -> &Trade {
        debug_assert_eq!(trade.sequence, self.next_sequence, "trade sequence out of order");
        self.next_sequence = trade.sequence + 1;
        self.trades.push(trade);
        &self.trades[self.trades.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    pub fn as_slice(&self) -> &[Trade] {
        &self.trades
    }

    pub fn last(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// Total traded volume
    pub fn total_volume(&self) -> Volume {
        self.trades.iter().map(|t| t.volume).sum()
    }

    /// Trades in which the given order took part, oldest first
    pub fn trades_for(&self, order_id: OrderId) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(move |t| t.involves(order_id))
    }
}
