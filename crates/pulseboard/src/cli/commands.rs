use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use std::path::Path;
use uuid::Uuid;

use vitals::{BudgetView, RiskDraft, RiskEntry, RiskPatch, ScheduleView};

use crate::cli::client::{DashboardClient, RiskFilter};
use crate::cli::display::{
  self, colored_severity_badge, currency, last_updated_label, progress_bar, risk_level_label, sort_risks,
  wrap_text, RiskSort,
};
use crate::cli::export::{render, DashboardSnapshot, ExportFormat};
use crate::server::types::{InsightRequest, InsightsResponse};

const RULE: &str = "────────────────────────────────────────────────────────────";

fn heading(title: &str) {
  println!("{}", title.blue().bold());
  println!("{}", RULE.dimmed());
}

/// Top-line KPI cards and when the data last changed
pub async fn overview(client: &DashboardClient) -> Result<()> {
  let schedule = client.schedule().await?;
  let budget = client.budget().await?;
  let risks = client.risks(&RiskFilter::default()).await?;

  let mut times = vec![risks.last_updated];
  times.extend(schedule.as_ref().map(|view| view.last_updated));
  times.extend(budget.as_ref().map(|view| view.last_updated));

  heading("Project Overview");
  println!("Last updated {}", last_updated_label(&times, Utc::now()).dimmed());
  println!();

  let sprint_progress = schedule.as_ref().map_or(0, |view| view.completion_percentage);
  let budget_burn = budget.as_ref().map_or(0.0, |view| view.snapshot.burn_rate);
  let high_risks = risks.summary.high;

  println!("{:<18} {:>5}%  {}", "Sprint Progress".bold(), sprint_progress, progress_bar(sprint_progress as f64, 20));
  match &schedule {
    Some(view) => println!("{:<18} {}", "", display::schedule_status(view.status)),
    None => println!("{:<18} {}", "", "No schedule data".dimmed()),
  }

  println!("{:<18} {:>5}%  {}", "Budget Burn".bold(), budget_burn, progress_bar(budget_burn, 20));
  match &budget {
    Some(view) => println!("{:<18} {}", "", display::budget_status(view.status)),
    None => println!("{:<18} {}", "", "No budget data".dimmed()),
  }

  let level = risk_level_label(high_risks);
  let level = match high_risks {
    0 => level.green(),
    1..=2 => level.yellow(),
    _ => level.red(),
  };
  println!("{:<18} {:>6}  {}", "High Risks".bold(), high_risks, level);
  Ok(())
}

fn print_schedule(view: &ScheduleView) {
  let sprint = &view.snapshot;
  heading(&format!("Sprint {}", sprint.sprint_number));
  println!(
    "{} / {} points completed ({}%)  {}",
    sprint.completed_points,
    sprint.planned_points,
    view.completion_percentage,
    display::schedule_status(view.status)
  );
  println!("{} days remaining", sprint.days_remaining);

  let burndown = &sprint.burndown_data;
  if burndown.ideal.is_empty() {
    return;
  }
  println!();
  println!("{:>5} {:>8} {:>8}", "Day".bold(), "Ideal".bold(), "Actual".bold());
  for (day, ideal) in burndown.ideal.iter().enumerate() {
    let actual = burndown.actual.get(day).copied().flatten().map_or_else(|| "-".to_string(), |v| v.to_string());
    println!("{day:>5} {ideal:>8} {actual:>8}");
  }
  if !burndown.is_aligned() {
    println!("{}", "Ideal and actual burndown series cover different days".yellow());
  }
}

pub async fn schedule(client: &DashboardClient) -> Result<()> {
  match client.schedule().await? {
    Some(view) => print_schedule(&view),
    None => println!("No schedule data found."),
  }
  Ok(())
}

fn print_budget(view: &BudgetView) {
  let position = &view.snapshot;
  heading("Budget");
  println!("{:<22} {}", "Total budget", currency(position.total_budget));
  println!("{:<22} {}", "Spent", currency(position.spent_amount));
  println!("{:<22} {}", "Remaining", currency(view.remaining_budget));
  println!("{:<22} {}%  {}", "Burn rate", position.burn_rate, display::budget_status(view.status));
  println!("{:<22} {}", "Projected completion", currency(position.projected_completion));

  if position.monthly_spend.is_empty() {
    return;
  }
  println!();
  println!("{}", "Monthly spend".bold());
  let peak = position.monthly_spend.values().copied().fold(0.0_f64, f64::max);
  for (month, spend) in position.monthly_spend.iter() {
    let share = if peak > 0.0 { spend / peak * 100.0 } else { 0.0 };
    println!("  {month:<6} {:>10}  {}", currency(*spend), progress_bar(share, 20));
  }
}

pub async fn budget(client: &DashboardClient) -> Result<()> {
  match client.budget().await? {
    Some(view) => print_budget(&view),
    None => println!("No budget data found."),
  }
  Ok(())
}

fn print_risk(risk: &RiskEntry) {
  println!(
    "{}  {}  {}",
    colored_severity_badge(risk.severity),
    risk.description.bold(),
    format!("[{}]", risk.status).dimmed()
  );
  println!("    {} · {} probability · owner: {}", risk.category, risk.probability, risk.owner.as_deref().unwrap_or("unassigned"));
  for line in wrap_text(&risk.impact, 72) {
    println!("    {}", line.dimmed());
  }
  println!("    {}", risk.id.to_string().dimmed());
}

pub async fn risks(client: &DashboardClient, filter: RiskFilter, sort: RiskSort, ascending: bool) -> Result<()> {
  let mut response = client.risks(&filter).await?;
  sort_risks(&mut response.risks, sort, ascending);

  let summary = &response.summary;
  heading("Risk Register");
  println!(
    "{} total · {} · {} · {}",
    summary.total,
    format!("{} high", summary.high).red(),
    format!("{} medium", summary.medium).yellow(),
    format!("{} low", summary.low).green()
  );
  println!();

  if response.risks.is_empty() {
    println!("No risks found.");
    return Ok(());
  }
  for risk in &response.risks {
    print_risk(risk);
  }
  Ok(())
}

pub async fn add_risk(client: &DashboardClient, draft: RiskDraft) -> Result<()> {
  let risk = client.create_risk(&draft).await?;
  println!("{} Added risk {} ({})", "✓".green(), risk.description.yellow(), risk.id);
  Ok(())
}

pub async fn update_risk(client: &DashboardClient, id: Uuid, patch: RiskPatch) -> Result<()> {
  let risk = client.update_risk(id, &patch).await?;
  println!("{} Updated risk {}", "✓".green(), risk.description.yellow());
  print_risk(&risk);
  Ok(())
}

pub async fn delete_risk(client: &DashboardClient, id: Uuid) -> Result<()> {
  client.delete_risk(id).await?;
  println!("{} Deleted risk {}", "✓".green(), id);
  Ok(())
}

fn print_insights(insights: &InsightsResponse) {
  let report = &insights.report;
  heading("Project Insights");
  println!("Generated {}", last_updated_label(&[insights.generated_at], Utc::now()).dimmed());

  if !report.recommendations.is_empty() {
    println!();
    println!("{}", "Recommendations".bold());
    for recommendation in &report.recommendations {
      println!("  {} {}", display::priority(recommendation.priority), recommendation.title.bold());
      for line in wrap_text(&recommendation.description, 70) {
        println!("    {line}");
      }
      if let Some(impact) = &recommendation.impact {
        println!("    {}", impact.dimmed());
      }
    }
  }

  println!();
  println!("{}", "Performance".bold());
  for (name, metric) in report.performance_metrics.iter() {
    println!("  {name:<20} {:>8}  {}", display::trend(metric.value, metric.direction), metric.comparison.dimmed());
  }

  if !report.action_items.is_empty() {
    println!();
    println!("{}", "Action Items".bold());
    for item in &report.action_items {
      println!("  {} {} {}", display::priority(item.priority), item.title, format!("({})", item.due_date).dimmed());
    }
  }
}

/// Current schedule, budget and risks in the shape `POST /api/insights` reads
async fn current_project_data(client: &DashboardClient) -> Result<InsightRequest> {
  let schedule = client.schedule().await?;
  let budget = client.budget().await?;
  let risks = client.risks(&RiskFilter::default()).await?;

  Ok(InsightRequest {
    schedule_data: schedule.map(serde_json::to_value).transpose()?,
    budget_data: budget.map(serde_json::to_value).transpose()?,
    risk_data: Some(serde_json::to_value(risks.risks)?),
  })
}

pub async fn insights(client: &DashboardClient, regenerate: bool) -> Result<()> {
  let insights = if regenerate {
    let request = current_project_data(client).await?;
    Some(client.generate_insights(&request).await?)
  } else {
    client.insights().await?
  };

  match insights {
    Some(insights) => print_insights(&insights),
    None => println!("No insights available. Run `pulseboard insights --regenerate` to generate them."),
  }
  Ok(())
}

pub async fn export(client: &DashboardClient, format: ExportFormat, output: Option<&Path>) -> Result<()> {
  let snapshot = DashboardSnapshot {
    exported_at: Utc::now(),
    schedule: client.schedule().await?,
    budget: client.budget().await?,
    risks: client.risks(&RiskFilter::default()).await?,
    insights: client.insights().await?,
  };
  let rendered = render(&snapshot, format)?;

  match output {
    Some(path) => {
      std::fs::write(path, &rendered).with_context(|| format!("Failed to write {}", path.display()))?;
      println!("{} Exported dashboard to {}", "✓".green(), path.display());
    }
    None => println!("{}", rendered.trim_end()),
  }
  Ok(())
}

pub async fn health(client: &DashboardClient) -> Result<()> {
  let health = client.health().await?;
  println!("{} {} at {} (v{}, {})", "✓".green(), health.status, client.base_url(), health.version, health.timestamp);
  Ok(())
}
