//! Reference project fixtures
//!
//! A fresh server starts with one sprint, one budget, five risks and an initial
//! insight report so the dashboard has something to show before any writes.

use anyhow::Result;

use vitals::{
  ActionItem, BudgetDraft, BurndownSeries, Direction, InsightDraft, OrderedMap, PerformanceMetric,
  Priority, Recommendation, RiskDraft, RiskStatus, ScheduleDraft,
};

use crate::Ledger;

pub async fn seed_fixtures(ledger: &Ledger) -> Result<()> {
  ledger.schedules.create(reference_schedule()).await?;
  ledger.budgets.create(reference_budget()).await?;

  let risks = reference_risks();
  let risk_count = risks.len();
  for risk in risks {
    ledger.risks.create(risk).await?;
  }

  ledger.insights.create(reference_insights()).await?;

  tracing::info!(risks = risk_count, "seeded reference project data");
  Ok(())
}

fn reference_schedule() -> ScheduleDraft {
  ScheduleDraft {
    sprint_number: 12,
    planned_points: 89,
    completed_points: 65,
    days_remaining: 4,
    burndown_data: BurndownSeries {
      ideal: vec![89.0, 80.0, 71.0, 62.0, 53.0, 44.0, 35.0, 26.0, 17.0, 8.0, 0.0],
      actual: vec![
        Some(89.0),
        Some(82.0),
        Some(76.0),
        Some(68.0),
        Some(59.0),
        Some(52.0),
        Some(41.0),
        Some(32.0),
        Some(24.0),
        Some(15.0),
        None,
      ],
    },
  }
}

fn reference_budget() -> BudgetDraft {
  BudgetDraft {
    total_budget: 125000.0,
    spent_amount: 97500.0,
    burn_rate: 78.0,
    projected_completion: 128750.0,
    monthly_spend: [
      ("Jan", 8500.0),
      ("Feb", 12000.0),
      ("Mar", 15000.0),
      ("Apr", 18000.0),
      ("May", 22000.0),
      ("Jun", 22000.0),
    ]
    .into_iter()
    .collect(),
  }
}

fn risk(
  description: &str,
  category: &str,
  severity: i64,
  impact: &str,
  probability: &str,
  status: RiskStatus,
  owner: &str,
) -> RiskDraft {
  RiskDraft {
    description: description.to_string(),
    category: category.to_string(),
    severity,
    impact: impact.to_string(),
    probability: probability.to_string(),
    status,
    owner: Some(owner.to_string()),
  }
}

fn reference_risks() -> Vec<RiskDraft> {
  vec![
    risk(
      "API Dependencies",
      "Technical",
      4,
      "Third-party service availability could block critical features",
      "High",
      RiskStatus::Open,
      "Sarah Chen",
    ),
    risk(
      "Resource Allocation",
      "Resource",
      4,
      "Developer availability constraints affecting delivery timeline",
      "Medium",
      RiskStatus::Mitigated,
      "Mike Rodriguez",
    ),
    risk(
      "Scope Creep",
      "Business",
      4,
      "Unplanned feature requests increasing project complexity",
      "High",
      RiskStatus::Open,
      "Jenny Liu",
    ),
    risk(
      "Performance Issues",
      "Technical",
      3,
      "Database query optimization needed for scalability",
      "Medium",
      RiskStatus::InProgress,
      "Alex Kumar",
    ),
    risk(
      "Security Compliance",
      "Compliance",
      2,
      "GDPR and SOC2 requirements need implementation",
      "Low",
      RiskStatus::Open,
      "David Park",
    ),
  ]
}

fn metric(value: i64, direction: Direction, comparison: &str) -> PerformanceMetric {
  PerformanceMetric { value, direction, comparison: comparison.to_string() }
}

fn reference_insights() -> InsightDraft {
  let recommendations = vec![
    Recommendation {
      priority: Priority::High,
      title: "Critical API Dependency Risk".to_string(),
      description: "3rd party service outages could delay Sprint 12 completion by 5-7 days. \
                    Implement circuit breakers and retry logic."
        .to_string(),
      category: "risk_mitigation".to_string(),
      impact: Some("Potential $15K cost overrun if delayed".to_string()),
    },
    Recommendation {
      priority: Priority::Medium,
      title: "Budget Variance Alert".to_string(),
      description: "Current burn rate shows 103% of planned spend. \
                    Reallocate 2 junior dev hours to optimize costs."
        .to_string(),
      category: "budget_optimization".to_string(),
      impact: Some("Save $3.8K over remaining project timeline".to_string()),
    },
    Recommendation {
      priority: Priority::Low,
      title: "Velocity Optimization Opportunity".to_string(),
      description: "Team delivering 15% above baseline. \
                    Consider advancing 2-3 features from Sprint 13 backlog."
        .to_string(),
      category: "schedule_optimization".to_string(),
      impact: Some("Accelerate delivery by 1-2 weeks".to_string()),
    },
  ];

  let performance_metrics: OrderedMap<PerformanceMetric> = [
    (
      "teamVelocityTrend",
      metric(15, Direction::Up, "15% above 3-sprint baseline (32 story points vs 28 avg)"),
    ),
    (
      "riskMitigationRate",
      metric(-12, Direction::Down, "Only 2 of 5 high-severity risks closed this month"),
    ),
    (
      "codeQualityScore",
      metric(87, Direction::Up, "Up 5 points: 94% test coverage, 0 critical bugs"),
    ),
    (
      "budgetEfficiency",
      metric(97, Direction::Down, "3% over planned burn rate, trending toward overrun"),
    ),
  ]
  .into_iter()
  .collect();

  let action_items = vec![
    ActionItem {
      priority: Priority::High,
      title: "Schedule architecture review for API fallback strategy".to_string(),
      due_date: "2 days".to_string(),
      category: "technical".to_string(),
    },
    ActionItem {
      priority: Priority::Medium,
      title: "Review and optimize resource allocation plan".to_string(),
      due_date: "1 week".to_string(),
      category: "resource".to_string(),
    },
    ActionItem {
      priority: Priority::Opportunity,
      title: "Evaluate Sprint 13 features for early delivery".to_string(),
      due_date: "Consider".to_string(),
      category: "schedule".to_string(),
    },
  ];

  InsightDraft { recommendations, performance_metrics, action_items }
}
