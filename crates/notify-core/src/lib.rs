//! notify-core: notification model, classification and dispatch.
//!
//! This crate provides:
//! - `InboundNotification`: lenient extraction of the discriminator and subject
//!   from a provider callback body
//! - `NotificationKind`: the closed set of lifecycle events plus an `Unknown`
//!   catch-all
//! - `NotificationSink`: the injected log capability records are written to
//! - `NotificationReceiver`: parse, classify, dispatch, acknowledge
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use notify_core::{CapturingSink, NotificationReceiver};
//!
//! let sink = Arc::new(CapturingSink::new());
//! let receiver = NotificationReceiver::new(sink.clone());
//!
//! let ack = receiver.receive(br#"{"notification_type":"ACCOUNT_DELETED","sub":"user-42"}"#);
//!
//! assert_eq!(ack.body(), "Notification received");
//! assert_eq!(sink.messages(), vec!["account deleted for user: user-42".to_string()]);
//! ```

pub mod receiver;
pub mod sink;
pub mod types;

pub use receiver::{Acknowledgement, NotificationReceiver, ACKNOWLEDGEMENT_BODY};
pub use sink::{CapturingSink, NotificationSink, SinkError, TracingSink};
pub use types::{InboundNotification, NotificationKind, NotificationRecord};
