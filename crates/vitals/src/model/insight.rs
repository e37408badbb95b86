use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordered::OrderedMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  #[serde(alias = "High")]
  High,
  #[serde(alias = "Medium")]
  Medium,
  #[serde(alias = "Low")]
  Low,
  #[serde(alias = "Opportunity")]
  Opportunity,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::High => "high",
      Self::Medium => "medium",
      Self::Low => "low",
      Self::Opportunity => "opportunity",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Up,
  Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
  pub priority: Priority,
  pub title: String,
  pub description: String,
  pub category: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceMetric {
  pub value: i64,
  pub direction: Direction,
  pub comparison: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
  pub priority: Priority,
  pub title: String,
  pub due_date: String,
  pub category: String,
}

/// Rule engine output before the store assigns an id and `lastGenerated`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightDraft {
  pub recommendations: Vec<Recommendation>,
  pub performance_metrics: OrderedMap<PerformanceMetric>,
  pub action_items: Vec<ActionItem>,
}

/// A generated report. Reports are never edited; a newer one replaces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
  pub id: Uuid,
  pub recommendations: Vec<Recommendation>,
  pub performance_metrics: OrderedMap<PerformanceMetric>,
  pub action_items: Vec<ActionItem>,
  pub last_generated: DateTime<Utc>,
}

impl InsightReport {
  pub fn from_draft(id: Uuid, last_generated: DateTime<Utc>, draft: InsightDraft) -> Self {
    Self {
      id,
      recommendations: draft.recommendations,
      performance_metrics: draft.performance_metrics,
      action_items: draft.action_items,
      last_generated,
    }
  }
}
