//! Schedule endpoint handlers

use axum::{
  extract::{rejection::JsonRejection, Extension, Json, Path, State},
  http::StatusCode,
};

use vitals::{schedule_view, ScheduleDraft, SchedulePatch, ScheduleView};

use super::{record_id, validated};
use crate::server::error::{internal, ApiError, SCHEDULE_NOT_FOUND};
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;

fn schedule_not_found() -> ApiError {
  ApiError::not_found("Schedule not found", SCHEDULE_NOT_FOUND)
}

/// GET /api/schedule - Latest sprint snapshot with completion and status
pub async fn latest_schedule(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Result<Json<ScheduleView>, ApiError> {
  let snapshot = state.ledger.schedules.latest().await.map_err(|e| {
    context.error(&format!("schedule lookup failed: {e:#}"));
    internal("Failed to retrieve schedule data")(e)
  })?;

  match snapshot {
    Some(snapshot) => Ok(Json(schedule_view(snapshot))),
    None => Err(ApiError::not_found("No schedule data found", SCHEDULE_NOT_FOUND)),
  }
}

/// POST /api/schedule - Record a new sprint snapshot
pub async fn create_schedule(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<ScheduleDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleView>), ApiError> {
  let draft = validated(payload, "Failed to create schedule")?;
  let snapshot = state.ledger.schedules.create(draft).await.map_err(internal("Failed to create schedule"))?;

  context.info(&format!("recorded sprint {} snapshot {}", snapshot.sprint_number, snapshot.id));
  Ok((StatusCode::CREATED, Json(schedule_view(snapshot))))
}

/// PUT /api/schedule/{id} - Merge supplied fields into a stored snapshot
pub async fn update_schedule(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Path(id): Path<String>,
  payload: Result<Json<SchedulePatch>, JsonRejection>,
) -> Result<Json<ScheduleView>, ApiError> {
  let patch = validated(payload, "Failed to update schedule")?;
  let id = record_id(&id, schedule_not_found)?;

  let updated = state.ledger.schedules.update(id, patch).await.map_err(internal("Failed to update schedule"))?;
  let snapshot = updated.ok_or_else(schedule_not_found)?;

  context.info(&format!("updated schedule snapshot {id}"));
  Ok(Json(schedule_view(snapshot)))
}
