//! Display formatting utilities for CLI output

use chrono::{DateTime, Utc};
use colored::*;

use vitals::{BudgetStatus, Direction, Priority, RiskEntry, ScheduleStatus, SeverityTier};

/// Column a risk table is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RiskSort {
  Severity,
  Description,
}

/// Relative label for the most recent of the given update times
pub fn last_updated_label(times: &[DateTime<Utc>], now: DateTime<Utc>) -> String {
  let Some(most_recent) = times.iter().max() else {
    return "Never".to_string();
  };

  let minutes = (now - *most_recent).num_minutes();
  if minutes < 1 {
    "Just now".to_string()
  } else if minutes < 60 {
    format!("{minutes} minutes ago")
  } else if minutes < 1440 {
    format!("{} hours ago", minutes / 60)
  } else {
    format!("{} days ago", minutes / 1440)
  }
}

/// `High (4)`, `Medium (3)`, `Low (2)`
pub fn severity_badge(severity: i64) -> String {
  format!("{} ({severity})", SeverityTier::of(severity).label())
}

pub fn colored_severity_badge(severity: i64) -> ColoredString {
  let badge = severity_badge(severity);
  match SeverityTier::of(severity) {
    SeverityTier::High => badge.red().bold(),
    SeverityTier::Medium => badge.yellow(),
    SeverityTier::Low => badge.green(),
  }
}

/// Overall label for the number of high-severity risks
pub fn risk_level_label(high_risks: usize) -> &'static str {
  match high_risks {
    0 => "Low Risk",
    1..=2 => "Medium Risk",
    _ => "High Risk",
  }
}

pub fn sort_risks(risks: &mut [RiskEntry], by: RiskSort, ascending: bool) {
  risks.sort_by(|a, b| {
    let ordering = match by {
      RiskSort::Severity => a.severity.cmp(&b.severity),
      RiskSort::Description => a.description.to_lowercase().cmp(&b.description.to_lowercase()),
    };
    if ascending {
      ordering
    } else {
      ordering.reverse()
    }
  });
}

pub fn schedule_status(status: ScheduleStatus) -> ColoredString {
  match status {
    ScheduleStatus::OnTrack => status.label().green(),
    ScheduleStatus::BehindSchedule => status.label().red(),
  }
}

pub fn budget_status(status: BudgetStatus) -> ColoredString {
  match status {
    BudgetStatus::OnTrack => status.label().green(),
    BudgetStatus::AtRisk => status.label().yellow(),
    BudgetStatus::OverBudget => status.label().red(),
  }
}

pub fn priority(priority: Priority) -> ColoredString {
  let label = priority.as_str().to_uppercase();
  match priority {
    Priority::High => label.red().bold(),
    Priority::Medium => label.yellow(),
    Priority::Low => label.blue(),
    Priority::Opportunity => label.green(),
  }
}

pub fn trend(value: i64, direction: Direction) -> ColoredString {
  match direction {
    Direction::Up => format!("▲ {value:+}").green(),
    Direction::Down => format!("▼ {value:+}").red(),
  }
}

/// Fixed-width bar for a percentage, clamped to 0..=100
pub fn progress_bar(percent: f64, width: usize) -> String {
  let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
  format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Whole-dollar amount with thousands separators; negatives keep their sign
pub fn currency(amount: f64) -> String {
  let rounded = amount.round() as i64;
  let digits = rounded.unsigned_abs().to_string();
  let mut grouped = String::new();
  for (index, digit) in digits.chars().enumerate() {
    if index > 0 && (digits.len() - index) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }
  if rounded < 0 {
    format!("-${grouped}")
  } else {
    format!("${grouped}")
  }
}

/// Wrap text to fit within a specified width
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current_line = String::new();

  for word in text.split_whitespace() {
    if current_line.is_empty() {
      current_line = word.to_string();
    } else if current_line.len() + 1 + word.len() <= width {
      current_line.push(' ');
      current_line.push_str(word);
    } else {
      lines.push(std::mem::take(&mut current_line));
      current_line = word.to_string();
    }
  }

  if !current_line.is_empty() {
    lines.push(current_line);
  }
  lines
}
