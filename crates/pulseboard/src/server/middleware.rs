//! Request context and middleware for the dashboard REST API
//!
//! Every request gets a unique id and a [`RequestContext`] extension. Handlers
//! log through the context so each event carries the request id, method and
//! path.

use axum::{
  extract::Request,
  http::{HeaderName, HeaderValue, Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request metadata injected into all handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub user_agent: String,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, user_agent: Option<&str>) -> Self {
    Self {
      request_id: Uuid::new_v4(),
      method,
      uri,
      user_agent: user_agent.unwrap_or("none").to_string(),
    }
  }

  pub fn info(&self, message: &str) {
    tracing::info!(request_id = %self.request_id, method = %self.method, path = self.uri.path(), "{message}");
  }

  pub fn warn(&self, message: &str) {
    tracing::warn!(request_id = %self.request_id, method = %self.method, path = self.uri.path(), "{message}");
  }

  pub fn error(&self, message: &str) {
    tracing::error!(request_id = %self.request_id, method = %self.method, path = self.uri.path(), "{message}");
  }

  fn log_request_start(&self) {
    tracing::info!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      user_agent = %self.user_agent,
      "request started"
    );
  }

  fn log_request_complete(&self, status: u16, duration_ms: f64) {
    tracing::info!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      status,
      duration_ms = format!("{duration_ms:.2}"),
      "request completed"
    );
  }
}

/// Inject a [`RequestContext`] into every request and stamp the response with its id
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let user_agent = request.headers().get("user-agent").and_then(|value| value.to_str().ok());
  let context = RequestContext::new(request.method().clone(), request.uri().clone(), user_agent);

  let start_time = Instant::now();
  context.log_request_start();

  request.extensions_mut().insert(context.clone());
  let mut response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms);

  if let Ok(value) = HeaderValue::from_str(&context.request_id.to_string()) {
    response.headers_mut().insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
  }

  response
}
