use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{non_negative_int, positive_int, when_present, Validate, ValidationError};

/// Ideal and actual remaining work per sprint day. Days not yet reached are `null` in `actual`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BurndownSeries {
  pub ideal: Vec<f64>,
  pub actual: Vec<Option<f64>>,
}

impl BurndownSeries {
  /// Both series are expected to cover the same days; this is reported, not enforced
  pub fn is_aligned(&self) -> bool {
    self.ideal.len() == self.actual.len()
  }

  /// Last recorded actual value, if any day has been reached
  pub fn latest_actual(&self) -> Option<f64> {
    self.actual.iter().rev().find_map(|value| *value)
  }
}

/// Sprint progress as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
  pub id: Uuid,
  pub sprint_number: i64,
  pub planned_points: i64,
  pub completed_points: i64,
  pub days_remaining: i64,
  pub burndown_data: BurndownSeries,
  pub created_at: DateTime<Utc>,
}

/// Insertable schedule fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
  pub sprint_number: i64,
  pub planned_points: i64,
  pub completed_points: i64,
  pub days_remaining: i64,
  pub burndown_data: BurndownSeries,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePatch {
  pub sprint_number: Option<i64>,
  pub planned_points: Option<i64>,
  pub completed_points: Option<i64>,
  pub days_remaining: Option<i64>,
  pub burndown_data: Option<BurndownSeries>,
}

impl ScheduleSnapshot {
  pub fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: ScheduleDraft) -> Self {
    Self {
      id,
      sprint_number: draft.sprint_number,
      planned_points: draft.planned_points,
      completed_points: draft.completed_points,
      days_remaining: draft.days_remaining,
      burndown_data: draft.burndown_data,
      created_at,
    }
  }

  pub fn apply(&mut self, patch: SchedulePatch) {
    if let Some(sprint_number) = patch.sprint_number {
      self.sprint_number = sprint_number;
    }
    if let Some(planned_points) = patch.planned_points {
      self.planned_points = planned_points;
    }
    if let Some(completed_points) = patch.completed_points {
      self.completed_points = completed_points;
    }
    if let Some(days_remaining) = patch.days_remaining {
      self.days_remaining = days_remaining;
    }
    if let Some(burndown_data) = patch.burndown_data {
      self.burndown_data = burndown_data;
    }
  }
}

impl Validate for ScheduleDraft {
  fn validate(&self) -> Result<(), ValidationError> {
    positive_int("plannedPoints", self.planned_points)?;
    non_negative_int("completedPoints", self.completed_points)?;
    non_negative_int("daysRemaining", self.days_remaining)
  }
}

impl Validate for SchedulePatch {
  fn validate(&self) -> Result<(), ValidationError> {
    when_present(self.planned_points, |v| positive_int("plannedPoints", v))?;
    when_present(self.completed_points, |v| non_negative_int("completedPoints", v))?;
    when_present(self.days_remaining, |v| non_negative_int("daysRemaining", v))
  }
}
