//! Ask (sell-side) order book
//!
//! Entries are ordered by kind descending (MARKET ahead of LIMIT), then price
//! ascending, then order id ascending.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Volume};
use types::order::OrderKind;

use super::entry::RestingEntry;
use super::RestingBook;

/// Priority key for the ask side; the smallest key is the best ask
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct AskKey {
    rank: Reverse<u8>,
    price: Price,
    order_id: OrderId,
    /// Insertion counter; keeps entries that share the tuple above apart
    arrival: u64,
}

impl AskKey {
    fn of(entry: &RestingEntry, arrival: u64) -> Self {
        Self {
            rank: Reverse(entry.kind.priority_rank()),
            price: entry.price,
            order_id: entry.order_id,
            arrival,
        }
    }
}

/// Ask (sell) side order book
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    entries: BTreeMap<AskKey, RestingEntry>,
    inserted: u64,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries best-first
    pub fn iter(&self) -> impl Iterator<Item = &RestingEntry> {
        self.entries.values()
    }

    pub fn entries(&self) -> Vec<RestingEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn total_volume(&self) -> Volume {
        self.entries.values().map(|e| e.remaining_volume).sum()
    }

    /// Lowest-priced LIMIT ask
    pub fn best_limit_price(&self) -> Option<Price> {
        self.entries
            .values()
            .find(|e| e.kind == OrderKind::LIMIT)
            .map(|e| e.price)
    }
}

impl RestingBook for AskBook {
    fn insert(&mut self, entry: RestingEntry) {
        if entry.remaining_volume == 0 {
            return;
        }
        let key = AskKey::of(&entry, self.inserted);
        self.inserted += 1;
        self.entries.insert(key, entry);
    }

    fn best(&self) -> Option<&RestingEntry> {
        self.entries.values().next()
    }

    fn pop_best(&mut self) -> Option<RestingEntry> {
        self.entries.pop_first().map(|(_, entry)| entry)
    }

    fn decrement_best(&mut self, amount: Volume) -> Option<Volume> {
        let mut head = self.entries.first_entry()?;
        let entry = head.get_mut();
        entry.remaining_volume = entry.remaining_volume.saturating_sub(amount);
        Some(entry.remaining_volume)
    }

    fn first_priced(&self) -> Option<&RestingEntry> {
        self.entries.values().find(|e| !e.is_market())
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
