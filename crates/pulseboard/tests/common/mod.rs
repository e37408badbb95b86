#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

use ledger::{seed_fixtures, Ledger};
use pulseboard::server::routing::create_router;
use pulseboard::server::state::AppState;
use vitals::{Clock, ManualClock};

pub struct TestContext {
  pub clock: Arc<ManualClock>,
  pub state: AppState,
  pub app: axum::Router,
}

pub fn start_time() -> DateTime<Utc> {
  "2025-06-02T09:00:00Z".parse().expect("valid timestamp")
}

/// Router over an empty in-memory store on a manual clock
pub fn empty_context() -> TestContext {
  let clock = Arc::new(ManualClock::new(start_time()));
  let shared: Arc<dyn Clock> = clock.clone();
  let state = AppState::new(Ledger::in_memory(shared.clone()), shared);
  let app = create_router(state.clone());
  TestContext { clock, state, app }
}

/// Router over the reference project
pub async fn seeded_context() -> TestContext {
  let context = empty_context();
  seed_fixtures(&context.state.ledger).await.expect("fixtures seed");
  context
}

/// Router over a hand-built ledger, e.g. one with mocked repositories
pub fn context_with(ledger: Ledger) -> TestContext {
  let clock = Arc::new(ManualClock::new(start_time()));
  let state = AppState::new(ledger, clock.clone());
  let app = create_router(state.clone());
  TestContext { clock, state, app }
}

pub async fn request_raw(app: &axum::Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value, Option<String>) {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .header("Content-Type", "application/json")
    .body(Body::from(body.to_string()))
    .expect("request should build");

  let resp = app.clone().oneshot(req).await.expect("router should respond");
  let status = resp.status();
  let request_id = resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()).map(str::to_string);

  let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body should read");
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("body should be JSON") };
  (status, value, request_id)
}

pub async fn request_json(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let body = body.map(|value| value.to_string()).unwrap_or_default();
  let (status, value, _) = request_raw(app, method, uri, &body).await;
  (status, value)
}
