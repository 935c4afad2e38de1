//! Core data types for provider notifications.
//!
//! The identity provider posts a JSON object carrying a `notification_type`
//! discriminator and a `sub` subject identifier. Everything here is lenient:
//! missing, null or oddly-typed fields collapse to empty strings so that
//! classification stays total over every possible body.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Wire name of the discriminator field.
pub const NOTIFICATION_TYPE_FIELD: &str = "notification_type";

/// Wire name of the subject identifier field.
pub const SUBJECT_FIELD: &str = "sub";

// ============================================================================
// Inbound Notification
// ============================================================================

/// A provider callback body after lenient extraction.
///
/// Unknown fields are kept in `extra` but never interpreted. Serializing
/// produces the wire shape again, omitting empty fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InboundNotification {
    /// Discriminator used for routing. Empty when absent or null.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notification_type: String,
    /// Identifier of the affected account. Empty when absent or null.
    #[serde(rename = "sub", skip_serializing_if = "String::is_empty")]
    pub subject_id: String,
    /// Provider-specific fields this receiver does not use.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundNotification {
    /// Creates a notification with the given discriminator and subject.
    pub fn new(notification_type: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            notification_type: notification_type.into(),
            subject_id: subject_id.into(),
            extra: Map::new(),
        }
    }

    /// Parses a raw request body.
    ///
    /// Never fails: bodies that are not JSON objects yield an empty
    /// notification, which classifies as `Unknown("")`.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                tracing::debug!(error = %e, "notification body is not valid JSON");
                Self::default()
            }
        }
    }

    /// Extracts the known fields from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            tracing::debug!("notification body is not a JSON object");
            return Self::default();
        };

        let notification_type = fields
            .remove(NOTIFICATION_TYPE_FIELD)
            .map(field_text)
            .unwrap_or_default();
        let subject_id = fields.remove(SUBJECT_FIELD).map(field_text).unwrap_or_default();

        Self {
            notification_type,
            subject_id,
            extra: fields,
        }
    }

    /// Classifies this notification.
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::classify(&self.notification_type)
    }
}

/// Renders a JSON field as text. Strings are taken verbatim, null is empty,
/// anything else keeps its JSON form so operators still see what arrived.
fn field_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Notification Kind
// ============================================================================

/// The lifecycle event a notification reports.
///
/// Classification is an exact, case-sensitive match against the provider's
/// discriminators. Anything else lands in `Unknown` with the raw value kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// The user turned on forwarding from their relay address.
    EmailForwardingEnabled,
    /// The user turned off forwarding from their relay address.
    EmailForwardingDisabled,
    /// The user deleted their account with the provider.
    AccountDeleted,
    /// Any other discriminator, including the empty string.
    Unknown(String),
}

impl NotificationKind {
    /// Every recognized kind, in wire order.
    pub const KNOWN: [NotificationKind; 3] = [
        Self::EmailForwardingEnabled,
        Self::EmailForwardingDisabled,
        Self::AccountDeleted,
    ];

    /// Maps a raw discriminator to its kind. Total over all strings.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "EMAIL_FORWARDING_ENABLED" => Self::EmailForwardingEnabled,
            "EMAIL_FORWARDING_DISABLED" => Self::EmailForwardingDisabled,
            "ACCOUNT_DELETED" => Self::AccountDeleted,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire discriminator. `Unknown` returns the raw value it was built from.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailForwardingEnabled => "EMAIL_FORWARDING_ENABLED",
            Self::EmailForwardingDisabled => "EMAIL_FORWARDING_DISABLED",
            Self::AccountDeleted => "ACCOUNT_DELETED",
            Self::Unknown(raw) => raw,
        }
    }

    /// Stable label for the `kind` log field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailForwardingEnabled => "email_forwarding_enabled",
            Self::EmailForwardingDisabled => "email_forwarding_disabled",
            Self::AccountDeleted => "account_deleted",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Action phrase for recognized kinds.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::EmailForwardingEnabled => Some("email forwarding enabled"),
            Self::EmailForwardingDisabled => Some("email forwarding disabled"),
            Self::AccountDeleted => Some("account deleted"),
            Self::Unknown(_) => None,
        }
    }

    /// Returns true unless this is the catch-all.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Renders the operator-facing log line.
    ///
    /// Known kinds name the subject; `Unknown` names the raw discriminator
    /// instead. Values are interpolated verbatim.
    pub fn describe(&self, subject_id: &str) -> String {
        match self {
            Self::Unknown(raw) => format!("unknown notification type: {raw}"),
            known => format!(
                "{} for user: {subject_id}",
                known.action().unwrap_or_default()
            ),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NotificationKind {
    fn from(raw: &str) -> Self {
        Self::classify(raw)
    }
}

// ============================================================================
// Notification Record
// ============================================================================

/// The outcome of dispatching one notification, handed to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    /// Classified kind.
    pub kind: NotificationKind,
    /// Subject identifier as received.
    pub subject_id: String,
    /// Rendered log line.
    pub message: String,
    /// When the receiver handled the notification.
    pub received_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Classifies a notification and renders its log line.
    pub fn from_notification(notification: &InboundNotification) -> Self {
        let kind = notification.kind();
        let message = kind.describe(&notification.subject_id);
        Self {
            kind,
            subject_id: notification.subject_id.clone(),
            message,
            received_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_values() {
        assert_eq!(
            NotificationKind::classify("EMAIL_FORWARDING_ENABLED"),
            NotificationKind::EmailForwardingEnabled
        );
        assert_eq!(
            NotificationKind::classify("EMAIL_FORWARDING_DISABLED"),
            NotificationKind::EmailForwardingDisabled
        );
        assert_eq!(
            NotificationKind::classify("ACCOUNT_DELETED"),
            NotificationKind::AccountDeleted
        );
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(
            NotificationKind::classify("account_deleted"),
            NotificationKind::Unknown("account_deleted".into())
        );
        assert_eq!(
            NotificationKind::classify(" ACCOUNT_DELETED"),
            NotificationKind::Unknown(" ACCOUNT_DELETED".into())
        );
    }

    #[test]
    fn known_kinds_round_trip_through_as_str() {
        for kind in NotificationKind::KNOWN {
            assert!(kind.is_known());
            assert_eq!(NotificationKind::classify(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_keeps_raw_value() {
        let kind = NotificationKind::classify("SOMETHING_NEW");
        assert!(!kind.is_known());
        assert_eq!(kind.as_str(), "SOMETHING_NEW");
        assert_eq!(kind.label(), "unknown");
        assert_eq!(kind.to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn describe_uses_action_phrases() {
        assert_eq!(
            NotificationKind::EmailForwardingEnabled.describe("u1"),
            "email forwarding enabled for user: u1"
        );
        assert_eq!(
            NotificationKind::EmailForwardingDisabled.describe("u2"),
            "email forwarding disabled for user: u2"
        );
        assert_eq!(
            NotificationKind::AccountDeleted.describe("user-42"),
            "account deleted for user: user-42"
        );
    }

    #[test]
    fn describe_unknown_names_discriminator_not_subject() {
        let kind = NotificationKind::classify("SOMETHING_NEW");
        assert_eq!(kind.describe("user-7"), "unknown notification type: SOMETHING_NEW");
        assert_eq!(
            NotificationKind::classify("").describe("user-7"),
            "unknown notification type: "
        );
    }

    #[test]
    fn describe_does_not_escape_subject() {
        let line = NotificationKind::AccountDeleted.describe("a \"quoted\"\nsubject");
        assert_eq!(line, "account deleted for user: a \"quoted\"\nsubject");
    }

    #[test]
    fn from_body_extracts_fields() {
        let body = br#"{"notification_type":"ACCOUNT_DELETED","sub":"user-42","event_time":1}"#;
        let n = InboundNotification::from_body(body);
        assert_eq!(n.notification_type, "ACCOUNT_DELETED");
        assert_eq!(n.subject_id, "user-42");
        assert_eq!(n.extra.get("event_time"), Some(&Value::from(1)));
        assert_eq!(n.kind(), NotificationKind::AccountDeleted);
    }

    #[test]
    fn from_body_empty_object() {
        let n = InboundNotification::from_body(b"{}");
        assert_eq!(n, InboundNotification::default());
        assert_eq!(n.kind(), NotificationKind::Unknown(String::new()));
    }

    #[test]
    fn from_body_null_fields_are_empty() {
        let n = InboundNotification::from_body(br#"{"notification_type":null,"sub":null}"#);
        assert_eq!(n.notification_type, "");
        assert_eq!(n.subject_id, "");
    }

    #[test]
    fn from_body_non_string_discriminator_keeps_json_text() {
        let n = InboundNotification::from_body(br#"{"notification_type":5,"sub":true}"#);
        assert_eq!(n.kind(), NotificationKind::Unknown("5".into()));
        assert_eq!(n.subject_id, "true");
    }

    #[test]
    fn from_body_garbage_degrades_to_unknown() {
        let bodies: [&[u8]; 5] = [b"not json", b"", b"[1,2]", b"\"ACCOUNT_DELETED\"", b"{\"notification"];
        for body in bodies {
            let n = InboundNotification::from_body(body);
            assert_eq!(n.kind(), NotificationKind::Unknown(String::new()));
        }
    }

    #[test]
    fn serializes_subject_as_sub() {
        let mut n = InboundNotification::new("ACCOUNT_DELETED", "user-42");
        n.extra.insert("events".into(), Value::from("x"));
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["sub"], "user-42");
        assert_eq!(json["notification_type"], "ACCOUNT_DELETED");
        assert_eq!(json["events"], "x");
    }

    #[test]
    fn serializing_omits_empty_fields() {
        let n = InboundNotification::new("ACCOUNT_DELETED", "");
        assert_eq!(
            serde_json::to_string(&n).unwrap(),
            r#"{"notification_type":"ACCOUNT_DELETED"}"#
        );
        assert_eq!(serde_json::to_string(&InboundNotification::default()).unwrap(), "{}");
    }

    #[test]
    fn record_missing_subject_renders_empty() {
        let n = InboundNotification::from_body(br#"{"notification_type":"EMAIL_FORWARDING_ENABLED"}"#);
        let record = NotificationRecord::from_notification(&n);
        assert_eq!(record.kind, NotificationKind::EmailForwardingEnabled);
        assert_eq!(record.subject_id, "");
        assert_eq!(record.message, "email forwarding enabled for user: ");
    }
}
