//! Dashboard record types
//!
//! Every stored record has an opaque `id` and a creation timestamp assigned by
//! the store. Each record type has a matching draft (the insertable fields)
//! and, where the record can be edited, a patch whose fields are all optional.

mod budget;
mod insight;
mod risk;
mod schedule;
mod user;

pub use budget::{BudgetDraft, BudgetPatch, BudgetSnapshot};
pub use insight::{
  ActionItem, Direction, InsightDraft, InsightReport, PerformanceMetric, Priority, Recommendation,
};
pub use risk::{RiskDraft, RiskEntry, RiskPatch, RiskStatus, SeverityTier};
pub use schedule::{BurndownSeries, ScheduleDraft, SchedulePatch, ScheduleSnapshot};
pub use user::{User, UserDraft};

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}
