//! Health and schema endpoint handlers

use axum::{extract::State, response::Json};
use chrono::SecondsFormat;
use schemars::schema_for;
use std::collections::BTreeMap;

use vitals::{BudgetDraft, BudgetPatch, BudgetView, RiskDraft, RiskEntry, RiskPatch, ScheduleDraft, SchedulePatch, ScheduleView};

use crate::server::error::{ApiError, ErrorBody, ROUTE_NOT_FOUND};
use crate::server::state::AppState;
use crate::server::types::{HealthResponse, InsightRequest, InsightsResponse, RisksResponse, SchemaResponse};

/// GET /api/health - Liveness check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "healthy".to_string(),
    timestamp: state.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
    version: env!("CARGO_PKG_VERSION").to_string(),
  })
}

/// GET /api/schema - JSON Schemas for request and response bodies
pub async fn schema() -> Json<SchemaResponse> {
  let schemas = BTreeMap::from([
    ("ScheduleView".to_string(), schema_for!(ScheduleView)),
    ("ScheduleDraft".to_string(), schema_for!(ScheduleDraft)),
    ("SchedulePatch".to_string(), schema_for!(SchedulePatch)),
    ("BudgetView".to_string(), schema_for!(BudgetView)),
    ("BudgetDraft".to_string(), schema_for!(BudgetDraft)),
    ("BudgetPatch".to_string(), schema_for!(BudgetPatch)),
    ("RiskEntry".to_string(), schema_for!(RiskEntry)),
    ("RiskDraft".to_string(), schema_for!(RiskDraft)),
    ("RiskPatch".to_string(), schema_for!(RiskPatch)),
    ("RisksResponse".to_string(), schema_for!(RisksResponse)),
    ("InsightRequest".to_string(), schema_for!(InsightRequest)),
    ("InsightsResponse".to_string(), schema_for!(InsightsResponse)),
    ("HealthResponse".to_string(), schema_for!(HealthResponse)),
    ("ErrorBody".to_string(), schema_for!(ErrorBody)),
  ]);

  Json(SchemaResponse { version: env!("CARGO_PKG_VERSION").to_string(), schemas })
}

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
  ApiError::not_found("Route not found", ROUTE_NOT_FOUND)
}
