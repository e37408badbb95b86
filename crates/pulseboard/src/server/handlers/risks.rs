//! Risk register endpoint handlers

use axum::{
  extract::{
    rejection::{JsonRejection, QueryRejection},
    Extension, Json, Path, Query, State,
  },
  http::StatusCode,
};

use ledger::RiskRegister;
use vitals::{number_from_str, RiskDraft, RiskEntry, RiskPatch, SeverityTier};

use super::{record_id, validated};
use crate::server::error::{internal, ApiError, RISK_NOT_FOUND};
use crate::server::middleware::RequestContext;
use crate::server::state::AppState;
use crate::server::types::{RiskQuery, RiskSummary, RisksResponse};

fn risk_not_found() -> ApiError {
  ApiError::not_found("Risk not found", RISK_NOT_FOUND)
}

/// Read a query value as a number. Empty and non-numeric values are ignored;
/// a value of only whitespace reads as 0.
pub fn lenient_number(raw: Option<&str>) -> Option<f64> {
  raw.filter(|value| !value.is_empty()).and_then(number_from_str)
}

/// Keep the first `limit` items. Fractions truncate toward zero and a negative
/// limit drops that many items from the end.
pub fn apply_limit<T>(items: &mut Vec<T>, limit: f64) {
  let len = items.len() as f64;
  let whole = limit.trunc();
  let end = if whole < 0.0 { (len + whole).max(0.0) } else { whole.min(len) };
  items.truncate(end as usize);
}

pub fn summarize(risks: &[RiskEntry]) -> RiskSummary {
  let count = |tier: SeverityTier| risks.iter().filter(|risk| risk.tier() == tier).count();
  RiskSummary {
    total: risks.len(),
    high: count(SeverityTier::High),
    medium: count(SeverityTier::Medium),
    low: count(SeverityTier::Low),
  }
}

/// GET /api/risks - Risks by descending severity with tier counts
pub async fn list_risks(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<RisksResponse>, ApiError> {
  let query = match query {
    Ok(Query(pairs)) => RiskQuery::from_pairs(pairs),
    Err(rejection) => {
      context.warn(&format!("ignoring unreadable query string: {}", rejection.body_text()));
      RiskQuery::default()
    }
  };

  let risks = match lenient_number(query.min_severity.as_deref()) {
    Some(min_severity) => state.ledger.risks.by_min_severity(min_severity).await,
    None => state.ledger.risks.all_by_severity().await,
  };
  let mut risks = risks.map_err(|e| {
    context.error(&format!("risk lookup failed: {e:#}"));
    internal("Failed to retrieve risk data")(e)
  })?;

  if let Some(limit) = lenient_number(query.limit.as_deref()) {
    apply_limit(&mut risks, limit);
  }

  Ok(Json(RisksResponse { summary: summarize(&risks), risks, last_updated: state.clock.now() }))
}

/// POST /api/risks - Add a risk to the register
pub async fn create_risk(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<RiskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<RiskEntry>), ApiError> {
  let draft = validated(payload, "Failed to create risk").inspect_err(|e| context.warn(&e.to_string()))?;
  let risk = state.ledger.risks.create(draft).await.map_err(internal("Failed to create risk"))?;

  context.info(&format!("created risk {} (severity {})", risk.id, risk.severity));
  Ok((StatusCode::CREATED, Json(risk)))
}

/// PUT /api/risks/{id} - Merge supplied fields into a stored risk
pub async fn update_risk(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Path(id): Path<String>,
  payload: Result<Json<RiskPatch>, JsonRejection>,
) -> Result<Json<RiskEntry>, ApiError> {
  let patch = validated(payload, "Failed to update risk").inspect_err(|e| context.warn(&e.to_string()))?;
  let id = record_id(&id, risk_not_found)?;

  let updated = state.ledger.risks.update(id, patch).await.map_err(internal("Failed to update risk"))?;
  let risk = updated.ok_or_else(risk_not_found)?;

  context.info(&format!("updated risk {id}"));
  Ok(Json(risk))
}

/// DELETE /api/risks/{id} - Remove a risk from the register
pub async fn delete_risk(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  let id = record_id(&id, risk_not_found)?;

  let deleted = state.ledger.risks.delete(id).await.map_err(internal("Failed to delete risk"))?;
  if !deleted {
    return Err(risk_not_found());
  }

  context.info(&format!("deleted risk {id}"));
  Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lenient_number() {
    assert_eq!(lenient_number(Some("4")), Some(4.0));
    assert_eq!(lenient_number(Some(" 3.5 ")), Some(3.5));
    assert_eq!(lenient_number(Some("")), None);
    assert_eq!(lenient_number(Some("high")), None);
    assert_eq!(lenient_number(Some("NaN")), None);
    assert_eq!(lenient_number(Some(" ")), Some(0.0));
    assert_eq!(lenient_number(Some("-inf")), None);
    assert_eq!(lenient_number(Some("infinity")), None);
    assert_eq!(lenient_number(Some("-Infinity")), Some(f64::NEG_INFINITY));
    assert_eq!(lenient_number(None), None);
  }

  #[test]
  fn test_limit_truncates_and_counts_back_from_the_end() {
    let run = |limit: f64| {
      let mut items = vec![1, 2, 3, 4, 5];
      apply_limit(&mut items, limit);
      items
    };

    assert_eq!(run(2.0), vec![1, 2]);
    assert_eq!(run(2.9), vec![1, 2]);
    assert_eq!(run(10.0), vec![1, 2, 3, 4, 5]);
    assert_eq!(run(0.0), Vec::<i32>::new());
    assert_eq!(run(-2.0), vec![1, 2, 3]);
    assert_eq!(run(-0.5), Vec::<i32>::new());
    assert_eq!(run(-9.0), Vec::<i32>::new());
    assert_eq!(run(f64::INFINITY), vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn test_repeated_query_keys_are_ignored() {
    let pairs = |raw: &[(&str, &str)]| -> Vec<(String, String)> { raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect() };

    let query = RiskQuery::from_pairs(pairs(&[("limit", "1"), ("limit", "2"), ("minSeverity", "4")]));
    assert_eq!(query.limit, None);
    assert_eq!(query.min_severity.as_deref(), Some("4"));

    let query = RiskQuery::from_pairs(pairs(&[("limit", "3"), ("sort", "desc")]));
    assert_eq!(query.limit.as_deref(), Some("3"));
    assert_eq!(query.min_severity, None);
  }
}
