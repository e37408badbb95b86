//! Binding between record types and the store

use chrono::{DateTime, Utc};
use std::convert::Infallible;
use uuid::Uuid;

use vitals::{
  BudgetDraft, BudgetPatch, BudgetSnapshot, InsightDraft, InsightReport, RiskDraft, RiskEntry,
  RiskPatch, ScheduleDraft, SchedulePatch, ScheduleSnapshot, User, UserDraft,
};

/// A storable record: built from a draft with a store-assigned id and timestamp,
/// and optionally merged with a patch afterwards.
pub trait Record: Clone + Send + Sync + 'static {
  type Draft: Send + 'static;
  type Patch: Send + 'static;

  /// Name used in log lines
  const KIND: &'static str;

  fn id(&self) -> Uuid;

  /// Creation timestamp; "latest" reads order by this
  fn recorded_at(&self) -> DateTime<Utc>;

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: Self::Draft) -> Self;

  fn apply(&mut self, patch: Self::Patch);
}

impl Record for ScheduleSnapshot {
  type Draft = ScheduleDraft;
  type Patch = SchedulePatch;
  const KIND: &'static str = "schedule";

  fn id(&self) -> Uuid {
    self.id
  }

  fn recorded_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: ScheduleDraft) -> Self {
    ScheduleSnapshot::from_draft(id, recorded_at, draft)
  }

  fn apply(&mut self, patch: SchedulePatch) {
    ScheduleSnapshot::apply(self, patch)
  }
}

impl Record for BudgetSnapshot {
  type Draft = BudgetDraft;
  type Patch = BudgetPatch;
  const KIND: &'static str = "budget";

  fn id(&self) -> Uuid {
    self.id
  }

  fn recorded_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: BudgetDraft) -> Self {
    BudgetSnapshot::from_draft(id, recorded_at, draft)
  }

  fn apply(&mut self, patch: BudgetPatch) {
    BudgetSnapshot::apply(self, patch)
  }
}

impl Record for RiskEntry {
  type Draft = RiskDraft;
  type Patch = RiskPatch;
  const KIND: &'static str = "risk";

  fn id(&self) -> Uuid {
    self.id
  }

  fn recorded_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: RiskDraft) -> Self {
    RiskEntry::from_draft(id, recorded_at, draft)
  }

  fn apply(&mut self, patch: RiskPatch) {
    RiskEntry::apply(self, patch)
  }
}

// Reports are replaced by newer ones, never edited
impl Record for InsightReport {
  type Draft = InsightDraft;
  type Patch = Infallible;
  const KIND: &'static str = "insights";

  fn id(&self) -> Uuid {
    self.id
  }

  fn recorded_at(&self) -> DateTime<Utc> {
    self.last_generated
  }

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: InsightDraft) -> Self {
    InsightReport::from_draft(id, recorded_at, draft)
  }

  fn apply(&mut self, patch: Infallible) {
    match patch {}
  }
}

impl Record for User {
  type Draft = UserDraft;
  type Patch = Infallible;
  const KIND: &'static str = "user";

  fn id(&self) -> Uuid {
    self.id
  }

  fn recorded_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_draft(id: Uuid, recorded_at: DateTime<Utc>, draft: UserDraft) -> Self {
    User::from_draft(id, recorded_at, draft)
  }

  fn apply(&mut self, patch: Infallible) {
    match patch {}
  }
}
