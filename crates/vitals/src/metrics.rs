//! Derived metrics for schedule and budget snapshots
//!
//! The views returned here are what the API serves for `GET /api/schedule` and
//! `GET /api/budget`: the stored snapshot plus computed status fields.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{BudgetSnapshot, ScheduleSnapshot};

/// Completion percentage at or above which a sprint counts as on track
pub const ON_TRACK_COMPLETION: i64 = 70;

/// Burn rate above which the budget is at risk
pub const AT_RISK_BURN_RATE: f64 = 70.0;

/// Burn rate above which the budget is over
pub const OVER_BUDGET_BURN_RATE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ScheduleStatus {
  #[serde(rename = "On Track")]
  OnTrack,
  #[serde(rename = "Behind Schedule")]
  BehindSchedule,
}

impl ScheduleStatus {
  pub fn label(&self) -> &'static str {
    match self {
      Self::OnTrack => "On Track",
      Self::BehindSchedule => "Behind Schedule",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BudgetStatus {
  #[serde(rename = "On Track")]
  OnTrack,
  #[serde(rename = "At Risk")]
  AtRisk,
  #[serde(rename = "Over Budget")]
  OverBudget,
}

impl BudgetStatus {
  pub fn label(&self) -> &'static str {
    match self {
      Self::OnTrack => "On Track",
      Self::AtRisk => "At Risk",
      Self::OverBudget => "Over Budget",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
  #[serde(flatten)]
  pub snapshot: ScheduleSnapshot,
  pub completion_percentage: i64,
  pub status: ScheduleStatus,
  pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
  #[serde(flatten)]
  pub snapshot: BudgetSnapshot,
  pub remaining_budget: f64,
  pub status: BudgetStatus,
  pub last_updated: DateTime<Utc>,
}

/// `round(100 * completed / planned)`, rounding halves up. A non-positive plan reads as 0%.
pub fn completion_percentage(planned_points: i64, completed_points: i64) -> i64 {
  if planned_points <= 0 {
    return 0;
  }
  // floor((200c + p) / 2p) == round-half-up(100c / p), exact in integers
  let planned = i128::from(planned_points);
  let completed = i128::from(completed_points);
  let rounded = (200 * completed + planned).div_euclid(2 * planned);
  i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

pub fn schedule_status(completion_percentage: i64) -> ScheduleStatus {
  if completion_percentage >= ON_TRACK_COMPLETION {
    ScheduleStatus::OnTrack
  } else {
    ScheduleStatus::BehindSchedule
  }
}

/// Tiers are exclusive on their lower bound: exactly 70 is on track, exactly 80 is at risk
pub fn budget_status(burn_rate: f64) -> BudgetStatus {
  if burn_rate > OVER_BUDGET_BURN_RATE {
    BudgetStatus::OverBudget
  } else if burn_rate > AT_RISK_BURN_RATE {
    BudgetStatus::AtRisk
  } else {
    BudgetStatus::OnTrack
  }
}

/// May be negative once spend passes the total
pub fn remaining_budget(total_budget: f64, spent_amount: f64) -> f64 {
  total_budget - spent_amount
}

pub fn schedule_view(snapshot: ScheduleSnapshot) -> ScheduleView {
  let completion_percentage = completion_percentage(snapshot.planned_points, snapshot.completed_points);
  ScheduleView {
    completion_percentage,
    status: schedule_status(completion_percentage),
    last_updated: snapshot.created_at,
    snapshot,
  }
}

pub fn budget_view(snapshot: BudgetSnapshot) -> BudgetView {
  BudgetView {
    remaining_budget: remaining_budget(snapshot.total_budget, snapshot.spent_amount),
    status: budget_status(snapshot.burn_rate),
    last_updated: snapshot.created_at,
    snapshot,
  }
}
