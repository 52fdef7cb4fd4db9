//! Matching engine core
//!
//! Dispatches one order at a time against the opposite book. Each call runs
//! its whole matching loop before returning, so no caller ever observes a
//! book mid-dispatch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use types::errors::ValidationError;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::{Order, OrderKind, OrderRequest, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook, RestingBook, RestingEntry};
use crate::config::{EngineConfig, MarketRemainderPolicy};
use crate::events::{CancelReason, EngineEvent};
use crate::matching::{crossing, executor, MatchError};
use crate::trade_log::TradeLog;
use crate::validator;

/// Engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// What a single dispatch did with an order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderOutcome {
    pub order_id: OrderId,
    pub trades: Vec<Trade>,
    /// Entry placed on the order's own book, if any volume rested
    pub rested: Option<RestingEntry>,
    /// Market volume dropped under [`MarketRemainderPolicy::Cancel`]
    pub canceled_volume: Volume,
}

impl OrderOutcome {
    fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            ..Self::default()
        }
    }

    /// Volume this order traded
    pub fn filled_volume(&self) -> Volume {
        self.trades.iter().map(|t| t.volume).sum()
    }

    /// True when the order traded its whole volume
    pub fn is_filled(&self) -> bool {
        !self.trades.is_empty() && self.rested.is_none() && self.canceled_volume == 0
    }
}

/// Totals for a processed feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub trades: usize,
}

/// Read-only copy of both books, best-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<RestingEntry>,
    pub asks: Vec<RestingEntry>,
}

/// Continuous double-auction engine for a single instrument
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    bids: BidBook,
    asks: AskBook,
    trades: TradeLog,
    config: EngineConfig,
    events: Vec<EngineEvent>,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            market_remainder = ?config.market_remainder,
            starting_sequence = config.starting_sequence,
            "MatchingEngine initialized"
        );

        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            trades: TradeLog::new(config.starting_sequence),
            config,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and dispatch a raw feed record
    ///
    /// A validation failure leaves both books and the trade log untouched.
    pub fn handle_order(&mut self, request: OrderRequest) -> Result<OrderOutcome, EngineError> {
        match validator::validate(&request) {
            Ok(order) => Ok(self.submit(order)),
            Err(err) => {
                warn!(order_id = request.id, error = %err, "Order rejected");
                self.emit(EngineEvent::rejected(&err));
                Err(err.into())
            }
        }
    }

    /// Dispatch an already validated order
    pub fn submit(&mut self, order: Order) -> OrderOutcome {
        debug!(
            order_id = %order.id,
            kind = ?order.kind,
            side = ?order.side,
            price = %order.price,
            volume = order.remaining_volume,
            "Handling order"
        );
        self.emit(EngineEvent::OrderAccepted {
            order_id: order.id,
            kind: order.kind,
            side: order.side,
            price: order.price,
            volume: order.remaining_volume,
        });

        if order.is_filled() {
            debug!(order_id = %order.id, "Zero-volume order ignored");
            return OrderOutcome::new(order.id);
        }

        match order.kind {
            OrderKind::LIMIT => self.handle_limit_order(order),
            OrderKind::MARKET => self.handle_market_order(order),
        }
    }

    /// Run a whole feed, counting rejects instead of stopping on them
    pub fn process_feed<I>(&mut self, feed: I) -> FeedSummary
    where
        I: IntoIterator<Item = OrderRequest>,
    {
        let mut summary = FeedSummary::default();
        for request in feed {
            match self.handle_order(request) {
                Ok(outcome) => {
                    summary.accepted += 1;
                    summary.trades += outcome.trades.len();
                }
                Err(_) => summary.rejected += 1,
            }
        }

        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            trades = summary.trades,
            "Feed processed"
        );
        summary
    }

    fn handle_limit_order(&mut self, mut order: Order) -> OrderOutcome {
        let mut outcome = OrderOutcome::new(order.id);
        outcome.trades = match order.side {
            Side::BUY => Self::match_limit(&mut order, &mut self.asks, &mut self.trades),
            Side::SELL => Self::match_limit(&mut order, &mut self.bids, &mut self.trades),
        };
        self.record_trades(&outcome.trades);

        if !order.is_filled() {
            outcome.rested = Some(self.rest(&order));
        }
        outcome
    }

    fn handle_market_order(&mut self, mut order: Order) -> OrderOutcome {
        order.price = Price::zero();

        let mut outcome = OrderOutcome::new(order.id);
        outcome.trades = match order.side {
            Side::BUY => Self::match_market(&mut order, &mut self.asks, &mut self.trades),
            Side::SELL => Self::match_market(&mut order, &mut self.bids, &mut self.trades),
        };
        self.record_trades(&outcome.trades);

        if !order.is_filled() {
            match self.config.market_remainder {
                MarketRemainderPolicy::Rest => outcome.rested = Some(self.rest(&order)),
                MarketRemainderPolicy::Cancel => {
                    warn!(
                        order_id = %order.id,
                        volume = order.remaining_volume,
                        "Market remainder canceled, no liquidity"
                    );
                    outcome.canceled_volume = order.remaining_volume;
                    self.emit(EngineEvent::OrderCanceled {
                        order_id: order.id,
                        volume: order.remaining_volume,
                        reason: CancelReason::NoLiquidity,
                    });
                }
            }
        }
        outcome
    }

    /// Match a limit order while it crosses the head of `book`
    fn match_limit<B: RestingBook>(order: &mut Order, book: &mut B, log: &mut TradeLog) -> Vec<Trade> {
        let mut trades = Vec::new();

        while let Some(head) = book.best() {
            if !crossing::crosses_head(order.side, order.price, head.price) {
                break;
            }
            match executor::execute(order, book, log) {
                Ok(execution) => {
                    trades.push(execution.trade);
                    if !execution.continue_matching {
                        break;
                    }
                }
                Err(err) => {
                    debug!(order_id = %order.id, error = %err, "Limit matching stopped");
                    break;
                }
            }
        }

        trades
    }

    /// Match a market order until it fills or `book` runs dry
    fn match_market<B: RestingBook>(order: &mut Order, book: &mut B, log: &mut TradeLog) -> Vec<Trade> {
        let mut trades = Vec::new();

        while !order.is_filled() && !book.is_empty() {
            match executor::execute(order, book, log) {
                Ok(execution) => {
                    trades.push(execution.trade);
                    if !execution.continue_matching {
                        break;
                    }
                }
                Err(MatchError::NoReferencePrice) => {
                    warn!(order_id = %order.id, "Opposite book holds only market orders");
                    break;
                }
                Err(err) => {
                    debug!(order_id = %order.id, error = %err, "Market matching stopped");
                    break;
                }
            }
        }

        trades
    }

    /// Place the order's remaining volume on its own book
    fn rest(&mut self, order: &Order) -> RestingEntry {
        let entry = RestingEntry::from(order);
        debug!(
            order_id = %entry.order_id,
            side = ?order.side,
            price = %entry.price,
            volume = entry.remaining_volume,
            "Order rested"
        );
        match order.side {
            Side::BUY => self.bids.insert(entry.clone()),
            Side::SELL => self.asks.insert(entry.clone()),
        }
        self.emit(EngineEvent::OrderRested {
            side: order.side,
            entry: entry.clone(),
        });
        entry
    }

    fn record_trades(&mut self, trades: &[Trade]) {
        if !self.config.emit_events {
            return;
        }
        self.events
            .extend(trades.iter().cloned().map(|trade| EngineEvent::TradeExecuted { trade }));
    }

    fn emit(&mut self, event: EngineEvent) {
        if self.config.emit_events {
            self.events.push(event);
        }
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn bid_book(&self) -> &BidBook {
        &self.bids
    }

    pub fn ask_book(&self) -> &AskBook {
        &self.asks
    }

    pub fn trade_log(&self) -> &TradeLog {
        &self.trades
    }

    pub fn best_bid(&self) -> Option<&RestingEntry> {
        self.bids.best()
    }

    pub fn best_ask(&self) -> Option<&RestingEntry> {
        self.asks.best()
    }

    /// Best ask minus best bid, over LIMIT entries only
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.bids.best_limit_price()?;
        let ask = self.asks.best_limit_price()?;
        Some(ask.as_decimal() - bid.as_decimal())
    }

    /// Copy of both books, best-first
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.entries(),
            asks: self.asks.entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::trade::FillStatus;

    fn limit(side: Side, price: u64, volume: Volume, id: u64) -> OrderRequest {
        OrderRequest::limit(side, Price::from_u64(price), volume, id)
    }

    fn entry(price: u64, volume: Volume, id: u64, kind: OrderKind) -> RestingEntry {
        RestingEntry::new(Price::from_u64(price), volume, OrderId::new(id), kind)
    }

    #[test]
    fn test_engine_resting_order() {
        let mut engine = MatchingEngine::default();
        let outcome = engine.handle_order(limit(Side::BUY, 100, 10, 1)).unwrap();

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.rested, Some(entry(100, 10, 1, OrderKind::LIMIT)));
        assert_eq!(engine.snapshot().bids, vec![entry(100, 10, 1, OrderKind::LIMIT)]);
        assert!(engine.ask_book().is_empty());
    }

    #[test]
    fn test_engine_full_match() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(limit(Side::BUY, 100, 10, 1)).unwrap();
        let outcome = engine.handle_order(limit(Side::SELL, 100, 10, 2)).unwrap();

        assert!(outcome.is_filled());
        assert_eq!(outcome.trades.len(), 1);
        assert!(engine.bid_book().is_empty());
        assert!(engine.ask_book().is_empty());
    }

    #[test]
    fn test_engine_buy_sweeps_several_levels_then_rests() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(limit(Side::SELL, 101, 3, 1)).unwrap();
        engine.handle_order(limit(Side::SELL, 102, 3, 2)).unwrap();
        engine.handle_order(limit(Side::SELL, 105, 3, 3)).unwrap();

        let outcome = engine.handle_order(limit(Side::BUY, 102, 10, 4)).unwrap();

        let prices: Vec<Price> = outcome.trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![Price::from_u64(101), Price::from_u64(102)]);
        assert_eq!(outcome.trades[1].bid_status, FillStatus::PART);
        assert_eq!(outcome.rested, Some(entry(102, 4, 4, OrderKind::LIMIT)));
        assert_eq!(engine.best_ask().unwrap().order_id, OrderId::new(3));
        assert_eq!(engine.spread(), Some(Decimal::from(3)));
    }

    #[test]
    fn test_engine_no_cross() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(limit(Side::SELL, 101, 1, 1)).unwrap();
        let outcome = engine.handle_order(limit(Side::BUY, 100, 1, 2)).unwrap();

        assert!(outcome.trades.is_empty());
        assert!(outcome.rested.is_some());
        assert_eq!(engine.trade_log().len(), 0);
    }

    #[test]
    fn test_zero_volume_order_does_nothing() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(limit(Side::SELL, 100, 5, 1)).unwrap();
        let outcome = engine.handle_order(limit(Side::BUY, 100, 0, 2)).unwrap();

        assert_eq!(outcome, OrderOutcome::new(OrderId::new(2)));
        assert!(engine.trade_log().is_empty());
        assert!(engine.bid_book().is_empty());
        assert_eq!(engine.ask_book().total_volume(), 5);
    }

    #[test]
    fn test_market_price_is_forced_to_zero() {
        let mut engine = MatchingEngine::default();
        let request = OrderRequest::new(OrderKind::MARKET_CODE, Side::SELL_CODE, Decimal::from(77), 2, 1);
        let outcome = engine.handle_order(request).unwrap();

        assert_eq!(outcome.rested, Some(entry(0, 2, 1, OrderKind::MARKET)));
    }

    #[test]
    fn test_market_remainder_canceled_under_cancel_policy() {
        let mut engine = MatchingEngine::new(EngineConfig {
            market_remainder: MarketRemainderPolicy::Cancel,
            ..EngineConfig::default()
        });
        engine.handle_order(limit(Side::SELL, 100, 4, 1)).unwrap();
        let outcome = engine.handle_order(OrderRequest::market(Side::BUY, 10, 2)).unwrap();

        assert_eq!(outcome.filled_volume(), 4);
        assert_eq!(outcome.canceled_volume, 6);
        assert!(outcome.rested.is_none());
        assert!(engine.bid_book().is_empty());
        assert!(engine.ask_book().is_empty());
    }

    #[test]
    fn test_market_against_resting_market_keeps_both() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(OrderRequest::market(Side::BUY, 5, 1)).unwrap();
        let outcome = engine.handle_order(OrderRequest::market(Side::SELL, 3, 2)).unwrap();

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.rested, Some(entry(0, 3, 2, OrderKind::MARKET)));
        assert_eq!(engine.bid_book().total_volume(), 5);
    }

    #[test]
    fn test_events_follow_dispatch_order() {
        let mut engine = MatchingEngine::default();
        engine.handle_order(limit(Side::BUY, 100, 5, 1)).unwrap();
        engine.drain_events();

        engine.handle_order(limit(Side::SELL, 99, 8, 2)).unwrap();
        let events = engine.drain_events();

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], EngineEvent::OrderAccepted { .. }));
        assert!(matches!(events[1], EngineEvent::TradeExecuted { .. }));
        assert!(matches!(events[2], EngineEvent::OrderRested { side: Side::SELL, .. }));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_events_disabled() {
        let mut engine = MatchingEngine::new(EngineConfig {
            emit_events: false,
            ..EngineConfig::default()
        });
        engine.handle_order(limit(Side::BUY, 100, 5, 1)).unwrap();
        let _ = engine.handle_order(OrderRequest::new(1, 9, Decimal::ONE, 1, 2));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_process_feed_continues_after_reject() {
        let mut engine = MatchingEngine::default();
        let feed = vec![
            limit(Side::BUY, 100, 5, 1),
            OrderRequest::new(7, 1, Decimal::from(100), 5, 2),
            limit(Side::SELL, 100, 5, 3),
        ];

        let summary = engine.process_feed(feed);

        assert_eq!(summary, FeedSummary { accepted: 2, rejected: 1, trades: 1 });
        assert!(engine.bid_book().is_empty());
    }

    #[test]
    fn test_trade_sequence_starts_from_config() {
        let mut engine = MatchingEngine::new(EngineConfig {
            starting_sequence: 500,
            ..EngineConfig::default()
        });
        engine.handle_order(limit(Side::SELL, 100, 1, 1)).unwrap();
        engine.handle_order(limit(Side::SELL, 100, 1, 2)).unwrap();
        engine.handle_order(limit(Side::BUY, 100, 2, 3)).unwrap();

        let sequences: Vec<u64> = engine.trade_log().iter().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![500, 501]);
    }
}
