//! Error envelope for every failing endpoint
//!
//! All error bodies have the shape `{message, error?}`: a human readable
//! message plus either a machine-readable code (404) or the underlying
//! failure text (400 and 500).

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

pub const SCHEDULE_NOT_FOUND: &str = "SCHEDULE_NOT_FOUND";
pub const BUDGET_NOT_FOUND: &str = "BUDGET_NOT_FOUND";
pub const INSIGHTS_NOT_FOUND: &str = "INSIGHTS_NOT_FOUND";
pub const RISK_NOT_FOUND: &str = "RISK_NOT_FOUND";
pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
  #[error("{message}")]
  NotFound { message: String, code: &'static str },

  #[error("{message}: {detail}")]
  Validation { message: String, detail: String },

  #[error("{message}: {detail}")]
  Internal { message: String, detail: String },
}

impl ApiError {
  pub fn not_found(message: impl Into<String>, code: &'static str) -> Self {
    Self::NotFound { message: message.into(), code }
  }

  pub fn validation(message: impl Into<String>, detail: impl Display) -> Self {
    Self::Validation { message: message.into(), detail: detail.to_string() }
  }

  pub fn internal(message: impl Into<String>, detail: impl Display) -> Self {
    Self::Internal { message: message.into(), detail: detail.to_string() }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::NotFound { .. } => StatusCode::NOT_FOUND,
      Self::Validation { .. } => StatusCode::BAD_REQUEST,
      Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn body(&self) -> ErrorBody {
    match self {
      Self::NotFound { message, code } => ErrorBody { message: message.clone(), error: Some(code.to_string()) },
      Self::Validation { message, detail } | Self::Internal { message, detail } => {
        ErrorBody { message: message.clone(), error: Some(detail.clone()) }
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(self.body())).into_response()
  }
}

/// Map a store fault to a 500 carrying the fault text
pub fn internal(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
  move |error| ApiError::internal(message, format!("{error:#}"))
}
