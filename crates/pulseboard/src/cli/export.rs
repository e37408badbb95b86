//! Dashboard snapshot export
//!
//! JSON exports are the API responses bundled together. CSV exports flatten
//! the same data into long form: one `section,item,field,value` row per value.

use chrono::{DateTime, Utc};
use serde::Serialize;

use vitals::{BudgetView, ScheduleView};

use crate::server::types::{InsightsResponse, RisksResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
  Json,
  Csv,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
  pub exported_at: DateTime<Utc>,
  pub schedule: Option<ScheduleView>,
  pub budget: Option<BudgetView>,
  pub risks: RisksResponse,
  pub insights: Option<InsightsResponse>,
}

pub fn render(snapshot: &DashboardSnapshot, format: ExportFormat) -> serde_json::Result<String> {
  match format {
    ExportFormat::Json => serde_json::to_string_pretty(snapshot),
    ExportFormat::Csv => Ok(to_csv(snapshot)),
  }
}

/// Quote a field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}

struct CsvRows {
  out: String,
}

impl CsvRows {
  fn new() -> Self {
    Self { out: "section,item,field,value\n".to_string() }
  }

  fn row(&mut self, section: &str, item: &str, field: &str, value: impl ToString) {
    let value = value.to_string();
    let fields = [section, item, field, value.as_str()].map(csv_field);
    self.out.push_str(&fields.join(","));
    self.out.push('\n');
  }
}

pub fn to_csv(snapshot: &DashboardSnapshot) -> String {
  let mut rows = CsvRows::new();
  rows.row("export", "", "exportedAt", snapshot.exported_at.to_rfc3339());

  if let Some(schedule) = &snapshot.schedule {
    let sprint = &schedule.snapshot;
    rows.row("schedule", "", "sprintNumber", sprint.sprint_number);
    rows.row("schedule", "", "plannedPoints", sprint.planned_points);
    rows.row("schedule", "", "completedPoints", sprint.completed_points);
    rows.row("schedule", "", "daysRemaining", sprint.days_remaining);
    rows.row("schedule", "", "completionPercentage", schedule.completion_percentage);
    rows.row("schedule", "", "status", schedule.status.label());
    for (day, (ideal, actual)) in sprint.burndown_data.ideal.iter().zip(&sprint.burndown_data.actual).enumerate() {
      let item = format!("day {day}");
      rows.row("burndown", &item, "ideal", ideal);
      rows.row("burndown", &item, "actual", actual.map(|v| v.to_string()).unwrap_or_default());
    }
  }

  if let Some(budget) = &snapshot.budget {
    let position = &budget.snapshot;
    rows.row("budget", "", "totalBudget", position.total_budget);
    rows.row("budget", "", "spentAmount", position.spent_amount);
    rows.row("budget", "", "remainingBudget", budget.remaining_budget);
    rows.row("budget", "", "burnRate", position.burn_rate);
    rows.row("budget", "", "projectedCompletion", position.projected_completion);
    rows.row("budget", "", "status", budget.status.label());
    for (month, spend) in position.monthly_spend.iter() {
      rows.row("monthlySpend", month, "spend", spend);
    }
  }

  for risk in &snapshot.risks.risks {
    let item = risk.id.to_string();
    rows.row("risk", &item, "description", &risk.description);
    rows.row("risk", &item, "category", &risk.category);
    rows.row("risk", &item, "severity", risk.severity);
    rows.row("risk", &item, "impact", &risk.impact);
    rows.row("risk", &item, "probability", &risk.probability);
    rows.row("risk", &item, "status", risk.status);
    rows.row("risk", &item, "owner", risk.owner.as_deref().unwrap_or_default());
  }
  let summary = &snapshot.risks.summary;
  rows.row("riskSummary", "", "total", summary.total);
  rows.row("riskSummary", "", "high", summary.high);
  rows.row("riskSummary", "", "medium", summary.medium);
  rows.row("riskSummary", "", "low", summary.low);

  if let Some(insights) = &snapshot.insights {
    for recommendation in &insights.report.recommendations {
      rows.row("recommendation", &recommendation.title, "priority", recommendation.priority.as_str());
      rows.row("recommendation", &recommendation.title, "description", &recommendation.description);
    }
    for (name, metric) in insights.report.performance_metrics.iter() {
      rows.row("performanceMetric", name, "value", metric.value);
      rows.row("performanceMetric", name, "comparison", &metric.comparison);
    }
    for item in &insights.report.action_items {
      rows.row("actionItem", &item.title, "priority", item.priority.as_str());
      rows.row("actionItem", &item.title, "dueDate", &item.due_date);
    }
  }

  rows.out
}
