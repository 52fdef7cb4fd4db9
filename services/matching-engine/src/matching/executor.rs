//! Trade execution logic
//!
//! One execution step matches the aggressor against the head of the opposite
//! book, appends exactly one trade and reports whether the dispatch loop
//! should keep going.

use thiserror::Error;
use tracing::debug;
use types::numeric::Price;
use types::order::{Order, OrderKind, Side};
use types::trade::{FillStatus, Trade};

use crate::book::RestingBook;
use crate::trade_log::TradeLog;

/// Result of a single execution step
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub trade: Trade,
    /// True only when the resting entry was exhausted and the aggressor still
    /// has volume left
    pub continue_matching: bool,
}

/// Match execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("opposite book is empty")]
    EmptyBook,

    #[error("aggressor has no remaining volume")]
    InvalidVolume,

    /// Market aggressor facing a book that holds only resting market entries
    #[error("no priced entry on the opposite book")]
    NoReferencePrice,
}

/// Execute one step of `aggressor` against the head of `book`
///
/// Volume comes from the head entry. Price comes from the first non-MARKET
/// entry, so a resting market order's nominal zero price never prints.
pub fn execute<B: RestingBook>(
    aggressor: &mut Order,
    book: &mut B,
    log: &mut TradeLog,
) -> Result<Execution, MatchError> {
    if aggressor.remaining_volume == 0 {
        return Err(MatchError::InvalidVolume);
    }
    let (maker_id, maker_volume) = match book.best() {
        Some(head) => (head.order_id, head.remaining_volume),
        None => return Err(MatchError::EmptyBook),
    };
    let price = trade_price(aggressor, book.first_priced().map(|e| e.price))?;

    let volume = aggressor.remaining_volume.min(maker_volume);
    aggressor.fill(volume);
    let maker_left = maker_volume - volume;
    if maker_left == 0 {
        book.pop_best();
    } else {
        book.decrement_best(volume);
    }

    let aggressor_status = FillStatus::from_remaining(aggressor.remaining_volume);
    let maker_status = FillStatus::from_remaining(maker_left);
    let (bid_order_id, bid_status, ask_order_id, ask_status) = match aggressor.side {
        Side::BUY => (aggressor.id, aggressor_status, maker_id, maker_status),
        Side::SELL => (maker_id, maker_status, aggressor.id, aggressor_status),
    };

    let trade = log
        .append(Trade {
            sequence: log.next_sequence(),
            price,
            volume,
            bid_order_id,
            bid_status,
            ask_order_id,
            ask_status,
            aggressor_side: aggressor.side,
        })
        .clone();

    debug!(
        sequence = trade.sequence,
        price = %trade.price,
        volume = trade.volume,
        bid = %trade.bid_order_id,
        bid_status = %trade.bid_status,
        ask = %trade.ask_order_id,
        ask_status = %trade.ask_status,
        "Trade executed"
    );

    Ok(Execution {
        trade,
        continue_matching: maker_left == 0 && aggressor.remaining_volume > 0,
    })
}

/// Price a trade between the aggressor and the book's reference price
///
/// A buy limit never pays more than its limit; every other path takes the
/// resting price. A limit facing only market entries trades at its own limit.
fn trade_price(aggressor: &Order, reference: Option<Price>) -> Result<Price, MatchError> {
    match (aggressor.kind, reference) {
        (OrderKind::MARKET, None) => Err(MatchError::NoReferencePrice),
        (OrderKind::LIMIT, None) => Ok(aggressor.price),
        (OrderKind::LIMIT, Some(resting)) if aggressor.side == Side::BUY => {
            Ok(aggressor.price.min(resting))
        }
        (_, Some(resting)) => Ok(resting),
    }
}
