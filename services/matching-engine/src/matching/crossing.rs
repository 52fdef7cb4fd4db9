//! Price crossing checks
//!
//! The dispatch loop compares the aggressor against the head of the opposite
//! book. A resting MARKET head carries price zero, so it crosses every buy
//! limit and no positive sell limit.

use types::numeric::Price;
use types::order::Side;

/// A bid at `bid` and an ask at `ask` can trade
pub fn bid_meets_ask(bid: Price, ask: Price) -> bool {
    bid >= ask
}

/// An aggressor on `side` at `limit` crosses a head entry priced `head`
pub fn crosses_head(side: Side, limit: Price, head: Price) -> bool {
    match side {
        Side::BUY => bid_meets_ask(limit, head),
        Side::SELL => bid_meets_ask(head, limit),
    }
}
