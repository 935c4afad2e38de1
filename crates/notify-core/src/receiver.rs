//! The notification receiver: parse, classify, dispatch, acknowledge.

use std::sync::Arc;

use crate::sink::{NotificationSink, TracingSink};
use crate::types::{InboundNotification, NotificationRecord};

/// Fixed acknowledgement body returned for every notification.
pub const ACKNOWLEDGEMENT_BODY: &str = "Notification received";

/// The response owed to the provider. Identical for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Acknowledgement;

impl Acknowledgement {
    /// HTTP status of the acknowledgement.
    pub const STATUS: u16 = 200;

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        Self::STATUS
    }

    /// Plain-text response body.
    pub fn body(&self) -> &'static str {
        ACKNOWLEDGEMENT_BODY
    }
}

/// Stateless handler for provider callbacks.
///
/// Cloning is cheap; clones share the same sink. Safe to call from any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct NotificationReceiver {
    sink: Arc<dyn NotificationSink>,
}

impl Default for NotificationReceiver {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink::new()))
    }
}

impl NotificationReceiver {
    /// Creates a receiver writing to the given sink.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Handles one raw callback body and returns the acknowledgement.
    ///
    /// Never fails. Malformed bodies classify as unknown and sink errors are
    /// swallowed after a warning.
    pub fn receive(&self, body: &[u8]) -> Acknowledgement {
        self.dispatch(body);
        Acknowledgement
    }

    /// Parses, classifies and records one body, returning the record written.
    pub fn dispatch(&self, body: &[u8]) -> NotificationRecord {
        tracing::debug!(
            payload = %String::from_utf8_lossy(body),
            "received provider notification"
        );

        let notification = InboundNotification::from_body(body);
        if !notification.extra.is_empty() {
            tracing::trace!(
                ignored_fields = notification.extra.len(),
                "ignoring provider-specific fields"
            );
        }

        let record = NotificationRecord::from_notification(&notification);
        if let Err(e) = self.sink.record(&record) {
            tracing::warn!(
                error = %e,
                kind = record.kind.label(),
                "failed to record notification"
            );
        }
        record
    }
}
