//! Pulseboard REST Server
//!
//! HTTP API for the project health dashboard: sprint schedule, budget, risk
//! register and rule-based insight reports.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use pulseboard::config::{Overrides, ServerConfig};
use pulseboard::server::startup::start_server;

#[derive(Parser)]
#[command(name = "pulseboard_server")]
#[command(about = "Pulseboard REST API Server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, env = "PULSEBOARD_BIND")]
  bind: Option<SocketAddr>,

  /// Path to a JSON config file
  #[arg(long)]
  config: Option<PathBuf>,

  /// Start with an empty store instead of the reference project
  #[arg(long, env = "PULSEBOARD_NO_SEED")]
  no_seed: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let overrides = Overrides { bind: args.bind, no_seed: args.no_seed };
  let config = ServerConfig::resolve(args.config.as_deref(), &overrides)?;

  // RUST_LOG wins over both the config file and --verbose
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) if args.verbose => EnvFilter::new("pulseboard=debug,ledger=debug,tower_http=debug,info"),
    Err(_) => EnvFilter::new(&config.log_filter),
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!("Starting Pulseboard REST Server v{}", env!("CARGO_PKG_VERSION"));
  tracing::info!(bind = %config.bind, seed_fixtures = config.seed_fixtures, "resolved configuration");

  start_server(config).await
}
