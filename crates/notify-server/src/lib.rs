//! notify-server: HTTP receiver for identity-provider lifecycle notifications.
//!
//! This crate provides:
//! - The notification endpoint (`POST /notifications` by default)
//! - A health check endpoint
//! - Environment-based configuration
//! - Request ID propagation and request tracing
//!
//! # Architecture
//!
//! The server is built on Axum. Handlers delegate to
//! [`notify_core::NotificationReceiver`], which classifies each callback and
//! writes one record to the configured sink. The endpoint acknowledges every
//! POST with `200 Notification received`; the provider owns retries.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notify_server::{config::ServerConfig, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let addr = config.socket_addr();
//!     let app = notify_server::app(AppState::new(config));
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::middleware::request_id::{propagate_request_id, request_id_layer, trace_layer};

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notify_core;

/// Build the router with the full middleware stack.
///
/// Layer order, outermost first: request ID assignment, request tracing,
/// request ID propagation onto the response.
pub fn app(state: AppState) -> Router {
    routes::build_router(state)
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(trace_layer())
        .layer(request_id_layer())
}
