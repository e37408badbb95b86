//! Endpoint handlers
//!
//! Handlers validate request bodies at the boundary, call the store and the
//! pure calculators, and translate every failure into an [`ApiError`].

pub mod budget;
pub mod insights;
pub mod risks;
pub mod schedule;
pub mod status;

use axum::extract::{rejection::JsonRejection, Json};
use uuid::Uuid;
use vitals::Validate;

use crate::server::error::ApiError;

/// Unwrap a JSON body and run its boundary checks. Both a malformed body and a
/// failed check are reported as 400 under `message`.
pub(crate) fn validated<T: Validate>(
  payload: Result<Json<T>, JsonRejection>,
  message: &'static str,
) -> Result<T, ApiError> {
  let Json(body) = payload.map_err(|rejection| ApiError::validation(message, rejection.body_text()))?;
  body.validate().map_err(|error| ApiError::validation(message, error))?;
  Ok(body)
}

/// Ids that do not parse cannot name a stored record
pub(crate) fn record_id(raw: &str, not_found: impl FnOnce() -> ApiError) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| not_found())
}
