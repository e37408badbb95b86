//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, put},
  Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::handlers::{budget, insights, risks, schedule, status};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// Create the application router over the given state
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoints
    .route("/api/health", get(status::health))
    .route("/api/schema", get(status::schema))
    // Schedule endpoints
    .route("/api/schedule", get(schedule::latest_schedule).post(schedule::create_schedule))
    .route("/api/schedule/{id}", put(schedule::update_schedule))
    // Budget endpoints
    .route("/api/budget", get(budget::latest_budget).post(budget::create_budget))
    .route("/api/budget/{id}", put(budget::update_budget))
    // Risk endpoints
    .route("/api/risks", get(risks::list_risks).post(risks::create_risk))
    .route("/api/risks/{id}", put(risks::update_risk).delete(risks::delete_risk))
    // Insight endpoints
    .route("/api/insights", get(insights::latest).post(insights::generate))
    .fallback(status::route_not_found)
    .with_state(state)
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_context_middleware)),
    )
}
