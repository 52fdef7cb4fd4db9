//! Matching logic module
//!
//! Crossing predicates and the single-counterparty execution step.

pub mod crossing;
pub mod executor;

pub use crossing::crosses_head;
pub use executor::{execute, Execution, MatchError};
