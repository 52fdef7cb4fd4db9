//! Lock-guarded engine handle
//!
//! The book pair is protected by one mutex. A dispatch holds the lock for its
//! whole matching loop; readers only ever see state between dispatches.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use types::order::OrderRequest;
use types::trade::Trade;

use crate::config::EngineConfig;
use crate::engine::{BookSnapshot, EngineError, MatchingEngine, OrderOutcome};
use crate::events::EngineEvent;

/// Clonable handle to a single engine shared across threads
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<MatchingEngine>>,
}

impl SharedEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_engine(MatchingEngine::new(config))
    }

    pub fn from_engine(engine: MatchingEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Books only change through whole execution steps; a poisoned lock still
    // guards consistent state.
    fn lock(&self) -> MutexGuard<'_, MatchingEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn handle_order(&self, request: OrderRequest) -> Result<OrderOutcome, EngineError> {
        self.lock().handle_order(request)
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.lock().snapshot()
    }

    /// Copy of the trade log
    pub fn trades(&self) -> Vec<Trade> {
        self.lock().trade_log().as_slice().to_vec()
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&self) -> Vec<EngineEvent> {
        self.lock().drain_events()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MatchingEngine) -> R) -> R {
        f(&mut self.lock())
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
