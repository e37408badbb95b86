//! Insight report endpoint handlers

use axum::{
  body::Bytes,
  extract::{Extension, Json, State},
};
use serde_json::Value;

use vitals::{generate_insights, is_stale, InsightInputs};

use crate::server::error::{internal, ApiError, INSIGHTS_NOT_FOUND};
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::InsightsResponse;

const GENERATE_FAILED: &str = "Failed to generate project insights";

/// Parse the loosely typed request body. An empty body reads as no data.
fn insight_inputs(body: &[u8]) -> Result<InsightInputs, ApiError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(InsightInputs::default());
  }
  let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::validation(GENERATE_FAILED, e))?;
  Ok(InsightInputs::from_json(value.get("scheduleData"), value.get("budgetData"), value.get("riskData")))
}

/// POST /api/insights - Return the latest report, regenerating it from the
/// posted data when none exists or the stored one is stale
pub async fn generate(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  body: Bytes,
) -> Result<Json<InsightsResponse>, ApiError> {
  let inputs = insight_inputs(&body)?;

  let current = state.ledger.insights.latest().await.map_err(internal(GENERATE_FAILED))?;
  if let Some(report) = current {
    if !is_stale(report.last_generated, state.clock.now()) {
      return Ok(Json(report.into()));
    }
  }

  let draft = generate_insights(&inputs);
  let report = state.ledger.insights.create(draft).await.map_err(|e| {
    context.error(&format!("failed to store insight report: {e:#}"));
    internal(GENERATE_FAILED)(e)
  })?;

  context.info(&format!(
    "generated insight report {} ({} recommendations, {} action items)",
    report.id,
    report.recommendations.len(),
    report.action_items.len()
  ));
  Ok(Json(report.into()))
}

/// GET /api/insights - Latest report without regeneration
pub async fn latest(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Result<Json<InsightsResponse>, ApiError> {
  let report = state.ledger.insights.latest().await.map_err(|e| {
    context.error(&format!("insight lookup failed: {e:#}"));
    internal("Failed to retrieve project insights")(e)
  })?;

  match report {
    Some(report) => Ok(Json(report.into())),
    None => Err(ApiError::not_found(
      "No insights available. Generate insights by posting project data to /api/insights",
      INSIGHTS_NOT_FOUND,
    )),
  }
}
