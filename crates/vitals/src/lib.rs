//! Project health core
//!
//! Record types for the dashboard, the derived-metrics calculator and the
//! insight rule engine. Everything in here is pure: no storage, no HTTP.

pub mod clock;
pub mod coerce;
pub mod metrics;
pub mod model;
pub mod ordered;
pub mod rules;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coerce::{number_from_str, number_from_value};
pub use metrics::{budget_view, schedule_view, BudgetStatus, BudgetView, ScheduleStatus, ScheduleView};
pub use model::{
  ActionItem, BudgetDraft, BudgetPatch, BudgetSnapshot, BurndownSeries, Direction, InsightDraft,
  InsightReport, PerformanceMetric, Priority, Recommendation, RiskDraft, RiskEntry, RiskPatch,
  RiskStatus, ScheduleDraft, SchedulePatch, ScheduleSnapshot, SeverityTier, User, UserDraft,
};
pub use ordered::OrderedMap;
pub use rules::{generate_insights, is_stale, InsightInputs, STALENESS_WINDOW_SECS};
pub use validation::{Validate, ValidationError};
