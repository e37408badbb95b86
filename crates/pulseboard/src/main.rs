use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use pulseboard::cli::client::{ClientConfig, DashboardClient, RiskFilter, DEFAULT_SERVER_URL};
use pulseboard::cli::commands;
use pulseboard::cli::display::RiskSort;
use pulseboard::cli::export::ExportFormat;
use vitals::{RiskDraft, RiskPatch, RiskStatus};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(about = "Pulseboard - Project Health Dashboard\nSprint progress, budget burn, risks and insights from the terminal")]
#[command(version)]
struct Cli {
  /// Base URL of the pulseboard server
  #[arg(long, global = true, env = "PULSEBOARD_URL", default_value = DEFAULT_SERVER_URL)]
  url: String,

  /// Request timeout in seconds
  #[arg(long, global = true, default_value = "30")]
  timeout: u64,

  #[command(subcommand)]
  command: Command,
}

/// Fields a risk can be created or updated with
#[derive(Args)]
struct RiskFields {
  /// Severity from 1 (low) to 5 (critical)
  #[arg(long)]
  severity: Option<i64>,
  /// Risk category, e.g. Technical or Business
  #[arg(long)]
  category: Option<String>,
  /// What happens if the risk materializes
  #[arg(long)]
  impact: Option<String>,
  /// Likelihood, e.g. High, Medium or Low
  #[arg(long)]
  probability: Option<String>,
  /// open, in_progress or mitigated
  #[arg(long, value_parser = parse_status)]
  status: Option<RiskStatus>,
  /// Person responsible for the risk
  #[arg(long)]
  owner: Option<String>,
}

fn parse_status(raw: &str) -> Result<RiskStatus, String> {
  serde_json::from_value(serde_json::Value::String(raw.to_string()))
    .map_err(|_| format!("unknown status '{raw}' (expected open, in_progress or mitigated)"))
}

#[derive(Subcommand)]
enum Command {
  /// Show the KPI cards and when the data last changed
  Overview,
  /// Show the current sprint and its burndown
  Schedule,
  /// Show the budget position and monthly spend
  Budget,
  /// List risks by severity
  Risks {
    /// Only risks at or above this severity
    #[arg(long)]
    min_severity: Option<i64>,
    /// Show at most this many risks; negative values drop that many from the end
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,
    /// Column to sort by
    #[arg(long, value_enum, default_value = "severity")]
    sort: RiskSort,
    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,
  },
  /// Add, update or delete a risk
  Risk {
    #[command(subcommand)]
    action: RiskAction,
  },
  /// Show the latest insight report
  Insights {
    /// Generate a fresh report from the current project data
    #[arg(short, long)]
    regenerate: bool,
  },
  /// Export the dashboard data
  Export {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ExportFormat,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Check that the server is up
  Health,
}

#[derive(Subcommand)]
enum RiskAction {
  /// Add a new risk
  Add {
    /// Short description of the risk
    description: String,
    #[command(flatten)]
    fields: RiskFields,
  },
  /// Update fields of an existing risk
  Update {
    /// Risk id
    id: Uuid,
    /// New description
    #[arg(long)]
    description: Option<String>,
    #[command(flatten)]
    fields: RiskFields,
    /// Remove the owner
    #[arg(long, conflicts_with = "owner")]
    clear_owner: bool,
  },
  /// Delete a risk
  Delete {
    /// Risk id
    id: Uuid,
  },
}

async fn handle_risk(client: &DashboardClient, action: RiskAction) -> Result<()> {
  match action {
    RiskAction::Add { description, fields } => {
      let draft = RiskDraft {
        description,
        category: fields.category.unwrap_or_else(|| "General".to_string()),
        severity: fields.severity.unwrap_or(3),
        impact: fields.impact.unwrap_or_default(),
        probability: fields.probability.unwrap_or_else(|| "Medium".to_string()),
        status: fields.status.unwrap_or_default(),
        owner: fields.owner,
      };
      commands::add_risk(client, draft).await
    }
    RiskAction::Update { id, description, fields, clear_owner } => {
      let owner = if clear_owner { Some(None) } else { fields.owner.map(Some) };
      let patch = RiskPatch {
        description,
        category: fields.category,
        severity: fields.severity,
        impact: fields.impact,
        probability: fields.probability,
        status: fields.status,
        owner,
      };
      commands::update_risk(client, id, patch).await
    }
    RiskAction::Delete { id } => commands::delete_risk(client, id).await,
  }
}

async fn handle(client: &DashboardClient, command: Command) -> Result<()> {
  match command {
    Command::Overview => commands::overview(client).await,
    Command::Schedule => commands::schedule(client).await,
    Command::Budget => commands::budget(client).await,
    Command::Risks { min_severity, limit, sort, asc } => {
      commands::risks(client, RiskFilter { min_severity, limit }, sort, asc).await
    }
    Command::Risk { action } => handle_risk(client, action).await,
    Command::Insights { regenerate } => commands::insights(client, regenerate).await,
    Command::Export { format, output } => commands::export(client, format, output.as_deref()).await,
    Command::Health => commands::health(client).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let client = DashboardClient::with_config(ClientConfig { base_url: cli.url, timeout_secs: cli.timeout })?;
  handle(&client, cli.command).await
}
