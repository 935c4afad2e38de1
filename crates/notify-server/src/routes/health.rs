//! Health check endpoint.
//!
//! Reports liveness plus the receiver route, so a deploy can be checked
//! against the callback URL registered with the provider.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::config::HEALTH_PATH;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Crate version of the running server.
    pub version: &'static str,
    /// Route notifications are accepted on.
    pub notify_path: String,
}

/// GET /health - Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        notify_path: state.config().notify_path.clone(),
    })
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health_check))
}
