//! Order book infrastructure module
//!
//! Contains the resting entry type and the bid and ask books. Each book keeps
//! its entries in a `BTreeMap` keyed by the full priority tuple, so the best
//! entry is always the first key.

pub mod entry;
pub mod bid_book;
pub mod ask_book;

pub use entry::RestingEntry;
pub use bid_book::BidBook;
pub use ask_book::AskBook;

use types::numeric::Volume;

/// Operations the execution step needs from the book it matches against
pub trait RestingBook {
    /// Place an entry and restore priority order
    fn insert(&mut self, entry: RestingEntry);
    /// Head of the book, if any
    fn best(&self) -> Option<&RestingEntry>;
    /// Remove and return the head of the book
    fn pop_best(&mut self) -> Option<RestingEntry>;
    /// Reduce the head's remaining volume, returning what is left on it
    fn decrement_best(&mut self, amount: Volume) -> Option<Volume>;
    /// First entry that carries a real price (skips resting MARKET entries)
    fn first_priced(&self) -> Option<&RestingEntry>;
    fn is_empty(&self) -> bool;
}
