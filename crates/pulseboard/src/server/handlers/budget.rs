//! Budget endpoint handlers

use axum::{
  extract::{rejection::JsonRejection, Extension, Json, Path, State},
  http::StatusCode,
};

use vitals::{budget_view, BudgetDraft, BudgetPatch, BudgetView};

use super::{record_id, validated};
use crate::server::error::{internal, ApiError, BUDGET_NOT_FOUND};
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;

fn budget_not_found() -> ApiError {
  ApiError::not_found("Budget not found", BUDGET_NOT_FOUND)
}

/// GET /api/budget - Latest budget snapshot with remaining budget and status
pub async fn latest_budget(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Result<Json<BudgetView>, ApiError> {
  let snapshot = state.ledger.budgets.latest().await.map_err(|e| {
    context.error(&format!("budget lookup failed: {e:#}"));
    internal("Failed to retrieve budget data")(e)
  })?;

  match snapshot {
    Some(snapshot) => Ok(Json(budget_view(snapshot))),
    None => Err(ApiError::not_found("No budget data found", BUDGET_NOT_FOUND)),
  }
}

/// POST /api/budget - Record a new budget snapshot
pub async fn create_budget(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<BudgetDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<BudgetView>), ApiError> {
  let draft = validated(payload, "Failed to create budget")?;
  let snapshot = state.ledger.budgets.create(draft).await.map_err(internal("Failed to create budget"))?;

  context.info(&format!("recorded budget snapshot {}", snapshot.id));
  Ok((StatusCode::CREATED, Json(budget_view(snapshot))))
}

/// PUT /api/budget/{id} - Merge supplied fields into a stored snapshot
pub async fn update_budget(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Path(id): Path<String>,
  payload: Result<Json<BudgetPatch>, JsonRejection>,
) -> Result<Json<BudgetView>, ApiError> {
  let patch = validated(payload, "Failed to update budget")?;
  let id = record_id(&id, budget_not_found)?;

  let updated = state.ledger.budgets.update(id, patch).await.map_err(internal("Failed to update budget"))?;
  let snapshot = updated.ok_or_else(budget_not_found)?;

  if snapshot.spent_amount > snapshot.total_budget {
    context.warn(&format!("budget {id} spend exceeds total"));
  }
  context.info(&format!("updated budget snapshot {id}"));
  Ok(Json(budget_view(snapshot)))
}
