//! Shared handler state

use std::sync::Arc;

use ledger::Ledger;
use vitals::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
  pub ledger: Ledger,
  pub clock: Arc<dyn Clock>,
}

impl AppState {
  pub fn new(ledger: Ledger, clock: Arc<dyn Clock>) -> Self {
    Self { ledger, clock }
  }

  /// Empty in-memory store on the wall clock
  pub fn in_memory() -> Self {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    Self::new(Ledger::in_memory(clock.clone()), clock)
  }
}
