//! REST API request and response types with schemars annotations

use chrono::{DateTime, Utc};
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use vitals::{InsightReport, RiskEntry};

// Risks
// =====

/// Query string for `GET /api/risks`. Both values are parsed leniently; see
/// the risks handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskQuery {
  /// Minimum severity to include
  pub min_severity: Option<String>,

  /// Maximum number of risks to return, applied after filtering and sorting
  pub limit: Option<String>,
}

impl RiskQuery {
  /// Pick the two keys out of raw query pairs. A key given more than once is
  /// treated as absent, like a value that is not a number.
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let single = |key: &str| {
      let mut values = pairs.iter().filter(|(name, _)| name == key).map(|(_, value)| value);
      match (values.next(), values.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
      }
    };
    Self { min_severity: single("minSeverity"), limit: single("limit") }
  }
}

/// Tier counts over the returned risks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RiskSummary {
  pub total: usize,
  pub high: usize,
  pub medium: usize,
  pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RisksResponse {
  /// Highest severity first
  pub risks: Vec<RiskEntry>,

  pub summary: RiskSummary,

  /// Time the response was produced
  pub last_updated: DateTime<Utc>,
}

// Insights
// ========

/// Body for `POST /api/insights`. Every part is optional and loosely typed;
/// only `scheduleData.completionPercentage`, `budgetData.burnRate` and
/// `riskData[].severity` are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
  #[serde(default)]
  pub schedule_data: Option<Value>,

  #[serde(default)]
  pub budget_data: Option<Value>,

  #[serde(default)]
  pub risk_data: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
  #[serde(flatten)]
  pub report: InsightReport,

  /// Same instant as `lastGenerated`
  pub generated_at: DateTime<Utc>,
}

impl From<InsightReport> for InsightsResponse {
  fn from(report: InsightReport) -> Self {
    Self { generated_at: report.last_generated, report }
  }
}

// Status
// ======

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
  pub status: String,

  /// ISO-8601 server time
  pub timestamp: String,

  pub version: String,
}

/// Response for `GET /api/schema`
#[derive(Debug, Clone, Serialize)]
pub struct SchemaResponse {
  pub version: String,
  pub schemas: BTreeMap<String, RootSchema>,
}
