//! HTTP client for the dashboard REST API
//!
//! The terminal client is a pure consumer of the HTTP contract: everything it
//! shows comes from these calls.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use vitals::{BudgetView, RiskDraft, RiskEntry, RiskPatch, ScheduleView};

use crate::server::error::ErrorBody;
use crate::server::types::{HealthResponse, InsightRequest, InsightsResponse, RisksResponse};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the dashboard HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the server (e.g., "http://127.0.0.1:5000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_SERVER_URL.to_string(), timeout_secs: 30 }
  }
}

/// Filters for `GET /api/risks`
#[derive(Debug, Clone, Default)]
pub struct RiskFilter {
  pub min_severity: Option<i64>,
  pub limit: Option<i64>,
}

pub struct DashboardClient {
  client: Client,
  config: ClientConfig,
}

impl DashboardClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  pub async fn health(&self) -> Result<HealthResponse> {
    let response = self.send(self.client.get(self.url("/api/health"))).await?;
    decode(response, "Health check failed").await
  }

  /// Latest schedule view; `None` when the server has no schedule yet
  pub async fn schedule(&self) -> Result<Option<ScheduleView>> {
    let response = self.send(self.client.get(self.url("/api/schedule"))).await?;
    decode_optional(response, "Failed to fetch schedule").await
  }

  /// Latest budget view; `None` when the server has no budget yet
  pub async fn budget(&self) -> Result<Option<BudgetView>> {
    let response = self.send(self.client.get(self.url("/api/budget"))).await?;
    decode_optional(response, "Failed to fetch budget").await
  }

  pub async fn risks(&self, filter: &RiskFilter) -> Result<RisksResponse> {
    let mut query = Vec::new();
    if let Some(min_severity) = filter.min_severity {
      query.push(("minSeverity", min_severity.to_string()));
    }
    if let Some(limit) = filter.limit {
      query.push(("limit", limit.to_string()));
    }

    let response = self.send(self.client.get(self.url("/api/risks")).query(&query)).await?;
    decode(response, "Failed to fetch risks").await
  }

  pub async fn create_risk(&self, draft: &RiskDraft) -> Result<RiskEntry> {
    let response = self.send(self.client.post(self.url("/api/risks")).json(draft)).await?;
    decode(response, "Failed to create risk").await
  }

  pub async fn update_risk(&self, id: Uuid, patch: &RiskPatch) -> Result<RiskEntry> {
    let response = self.send(self.client.put(self.url(&format!("/api/risks/{id}"))).json(patch)).await?;
    decode(response, "Failed to update risk").await
  }

  pub async fn delete_risk(&self, id: Uuid) -> Result<()> {
    let response = self.send(self.client.delete(self.url(&format!("/api/risks/{id}")))).await?;
    if !response.status().is_success() {
      return Err(error_from(response, "Failed to delete risk").await);
    }
    Ok(())
  }

  /// Latest report; `None` when no report has been generated
  pub async fn insights(&self) -> Result<Option<InsightsResponse>> {
    let response = self.send(self.client.get(self.url("/api/insights"))).await?;
    decode_optional(response, "Failed to fetch insights").await
  }

  pub async fn generate_insights(&self, request: &InsightRequest) -> Result<InsightsResponse> {
    let response = self.send(self.client.post(self.url("/api/insights")).json(request)).await?;
    decode(response, "Failed to generate insights").await
  }

  async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
    request.send().await.with_context(|| format!("Could not reach pulseboard server at {}", self.config.base_url))
  }
}

async fn decode<T: DeserializeOwned>(response: Response, failure: &str) -> Result<T> {
  if !response.status().is_success() {
    return Err(error_from(response, failure).await);
  }
  response.json().await.with_context(|| format!("{failure}: unexpected response body"))
}

async fn decode_optional<T: DeserializeOwned>(response: Response, failure: &str) -> Result<Option<T>> {
  if response.status() == StatusCode::NOT_FOUND {
    return Ok(None);
  }
  decode(response, failure).await.map(Some)
}

/// Turn a failing response into an error carrying the server's envelope
async fn error_from(response: Response, failure: &str) -> anyhow::Error {
  let status = response.status();
  let text = match response.text().await {
    Ok(text) => text,
    Err(e) => return anyhow!("{failure} ({status}): {e}"),
  };

  match serde_json::from_str::<ErrorBody>(&text) {
    Ok(ErrorBody { message, error: Some(detail) }) => anyhow!("{failure} ({status}): {message}: {detail}"),
    Ok(ErrorBody { message, error: None }) => anyhow!("{failure} ({status}): {message}"),
    Err(_) => anyhow!("{failure} ({status}): {text}"),
  }
}
