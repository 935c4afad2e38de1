//! Log sinks that dispatched notifications are written to.
//!
//! The receiver never talks to a global logger directly. It is handed an
//! `Arc<dyn NotificationSink>` so production code can write through
//! `tracing` while tests substitute a `CapturingSink`.

use std::sync::Mutex;

use crate::types::NotificationRecord;

/// Errors a sink may report. The receiver logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The backing log destination could not accept the record.
    #[error("sink unavailable: {0}")]
    Unavailable(String),

    /// A sink's internal lock was poisoned by a panicking writer.
    #[error("sink lock poisoned")]
    Poisoned,
}

/// Destination for dispatched notification records.
///
/// Implementations must be cheap and must not block on other requests.
pub trait NotificationSink: Send + Sync + std::fmt::Debug {
    /// Records one dispatched notification.
    fn record(&self, record: &NotificationRecord) -> Result<(), SinkError>;
}

// ============================================================================
// Tracing Sink
// ============================================================================

/// Writes records as structured `tracing` events.
///
/// Recognized kinds are logged at `info` with the subject; unknown kinds at
/// `warn` with the raw discriminator so new provider event types stand out.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for TracingSink {
    fn record(&self, record: &NotificationRecord) -> Result<(), SinkError> {
        if record.kind.is_known() {
            tracing::info!(
                kind = record.kind.label(),
                subject_id = %record.subject_id,
                received_at = %record.received_at,
                "{}",
                record.message
            );
        } else {
            tracing::warn!(
                kind = record.kind.label(),
                notification_type = %record.kind.as_str(),
                received_at = %record.received_at,
                "{}",
                record.message
            );
        }
        Ok(())
    }
}

// ============================================================================
// Capturing Sink
// ============================================================================

/// Keeps every record in memory. Used by tests and local tooling.
#[derive(Debug, Default)]
pub struct CapturingSink {
    records: Mutex<Vec<NotificationRecord>>,
}

impl CapturingSink {
    /// Creates an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured records, oldest first.
    pub fn records(&self) -> Vec<NotificationRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the captured log lines, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all captured records.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl NotificationSink for CapturingSink {
    fn record(&self, record: &NotificationRecord) -> Result<(), SinkError> {
        let mut records = self.records.lock().map_err(|_| SinkError::Poisoned)?;
        records.push(record.clone());
        Ok(())
    }
}
