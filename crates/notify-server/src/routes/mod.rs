//! Route definitions for the HTTP API.

pub mod health;
pub mod notifications;

use axum::{
    Router,
    http::{Method, Uri},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(notifications::routes(&state.config().notify_path))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// Fallback for paths with no route.
async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Fallback for known paths hit with the wrong method.
async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    tracing::debug!(%method, path = uri.path(), "rejected request with unsupported method");
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}
