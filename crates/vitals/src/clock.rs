//! Time source used for record timestamps and insight staleness

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock that only moves when told to. Used to drive the staleness window in tests.
#[derive(Debug)]
pub struct ManualClock {
  current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self { current: Mutex::new(start) }
  }

  pub fn advance(&self, by: Duration) {
    let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *current += by;
  }

  pub fn set(&self, to: DateTime<Utc>) {
    let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *current = to;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}
