//! Record store for the project health dashboard
//!
//! Handlers talk to a [`Ledger`], a bundle of one [`Repository`] per record
//! type. The repositories are trait objects so a durable backend can stand in
//! for the in-memory one without touching the calculator or rule engine.

pub mod memory;
pub mod record;
pub mod repository;
pub mod seed;

use std::sync::Arc;

use vitals::{BudgetSnapshot, Clock, InsightReport, RiskEntry, ScheduleSnapshot, User};

pub use memory::MemoryRepository;
pub use record::Record;
pub use repository::{sort_by_severity, Repository, RiskRegister, UserDirectory};
pub use seed::seed_fixtures;

/// One repository per record type
#[derive(Clone)]
pub struct Ledger {
  pub schedules: Arc<dyn Repository<ScheduleSnapshot>>,
  pub budgets: Arc<dyn Repository<BudgetSnapshot>>,
  pub risks: Arc<dyn Repository<RiskEntry>>,
  pub insights: Arc<dyn Repository<InsightReport>>,
  pub users: Arc<dyn Repository<User>>,
}

impl Ledger {
  /// Process-local store; contents are lost on restart
  pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
    Self {
      schedules: Arc::new(MemoryRepository::new(clock.clone())),
      budgets: Arc::new(MemoryRepository::new(clock.clone())),
      risks: Arc::new(MemoryRepository::new(clock.clone())),
      insights: Arc::new(MemoryRepository::new(clock.clone())),
      users: Arc::new(MemoryRepository::new(clock)),
    }
  }
}
