use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::validation::{in_range, when_present, Validate, ValidationError};

pub const MIN_SEVERITY: i64 = 1;
pub const MAX_SEVERITY: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
  #[default]
  Open,
  InProgress,
  Mitigated,
}

impl fmt::Display for RiskStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Open => write!(f, "open"),
      Self::InProgress => write!(f, "in_progress"),
      Self::Mitigated => write!(f, "mitigated"),
    }
  }
}

/// Coarse bucket over the 1-5 severity scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
  Low,
  Medium,
  High,
}

impl SeverityTier {
  pub fn of(severity: i64) -> Self {
    match severity {
      s if s >= 4 => Self::High,
      3 => Self::Medium,
      _ => Self::Low,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::High => "High",
      Self::Medium => "Medium",
      Self::Low => "Low",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskEntry {
  pub id: Uuid,
  pub description: String,
  pub category: String,
  pub severity: i64,
  pub impact: String,
  pub probability: String,
  pub status: RiskStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub owner: Option<String>,
  pub created_at: DateTime<Utc>,
}

/// Insertable risk fields. A missing `status` means the risk is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskDraft {
  pub description: String,
  pub category: String,
  pub severity: i64,
  pub impact: String,
  pub probability: String,
  #[serde(default)]
  pub status: RiskStatus,
  #[serde(default)]
  pub owner: Option<String>,
}

/// Partial risk update. `owner: null` clears the owner; an absent `owner` keeps it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskPatch {
  pub description: Option<String>,
  pub category: Option<String>,
  pub severity: Option<i64>,
  pub impact: Option<String>,
  pub probability: Option<String>,
  pub status: Option<RiskStatus>,
  #[serde(default, deserialize_with = "super::double_option", skip_serializing_if = "Option::is_none")]
  #[schemars(with = "Option<String>")]
  pub owner: Option<Option<String>>,
}

impl RiskEntry {
  pub fn from_draft(id: Uuid, created_at: DateTime<Utc>, draft: RiskDraft) -> Self {
    Self {
      id,
      description: draft.description,
      category: draft.category,
      severity: draft.severity,
      impact: draft.impact,
      probability: draft.probability,
      status: draft.status,
      owner: draft.owner,
      created_at,
    }
  }

  pub fn tier(&self) -> SeverityTier {
    SeverityTier::of(self.severity)
  }

  pub fn apply(&mut self, patch: RiskPatch) {
    if let Some(description) = patch.description {
      self.description = description;
    }
    if let Some(category) = patch.category {
      self.category = category;
    }
    if let Some(severity) = patch.severity {
      self.severity = severity;
    }
    if let Some(impact) = patch.impact {
      self.impact = impact;
    }
    if let Some(probability) = patch.probability {
      self.probability = probability;
    }
    if let Some(status) = patch.status {
      self.status = status;
    }
    if let Some(owner) = patch.owner {
      self.owner = owner;
    }
  }
}

fn severity_in_range(value: i64) -> Result<(), ValidationError> {
  in_range("severity", value, MIN_SEVERITY, MAX_SEVERITY)
}

impl Validate for RiskDraft {
  fn validate(&self) -> Result<(), ValidationError> {
    severity_in_range(self.severity)
  }
}

impl Validate for RiskPatch {
  fn validate(&self) -> Result<(), ValidationError> {
    when_present(self.severity, severity_in_range)
  }
}
