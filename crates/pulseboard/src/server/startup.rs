//! REST server startup

use anyhow::{Context, Result};
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::routing::create_router;
use crate::server::state::AppState;

/// Seed the store when configured, bind, and serve until the process exits
pub async fn start_server(config: ServerConfig) -> Result<()> {
  let state = AppState::in_memory();
  if config.seed_fixtures {
    ledger::seed_fixtures(&state.ledger).await.context("failed to seed fixture data")?;
  }

  let listener = TcpListener::bind(config.bind)
    .await
    .with_context(|| format!("failed to bind {}", config.bind))?;
  serve_on(listener, state).await
}

/// Serve the router on an already bound listener
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
  let addr: SocketAddr = listener.local_addr()?;
  tracing::info!(%addr, "pulseboard server listening");

  match serve(listener, create_router(state)).await {
    Ok(()) => {
      tracing::info!("server shut down gracefully");
      Ok(())
    }
    Err(e) => {
      tracing::error!("server error: {e}");
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}
