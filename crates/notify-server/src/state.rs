//! Application state shared across handlers.

use std::sync::Arc;

use notify_core::{NotificationReceiver, NotificationSink, TracingSink};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
/// It holds no mutable request state; the sink is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Classifies callbacks and writes them to the sink.
    receiver: NotificationReceiver,
}

impl AppState {
    /// Create application state that logs through `tracing`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink::new()))
    }

    /// Create application state writing to a custom sink.
    pub fn with_sink(config: ServerConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            config: Arc::new(config),
            receiver: NotificationReceiver::new(sink),
        }
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the notification receiver.
    pub fn receiver(&self) -> &NotificationReceiver {
        &self.receiver
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
