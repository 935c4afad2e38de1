//! Provider notification endpoint.
//!
//! Endpoint: POST {NOTIFY_PATH} (default `/notifications`)
//!
//! The identity provider posts lifecycle events here:
//!
//! ```text
//! POST /notifications
//! {"notification_type": "ACCOUNT_DELETED", "sub": "001234.abcd..."}
//!
//! 200 OK
//! Notification received
//! ```
//!
//! The body is read as raw bytes rather than through the `Json` extractor so
//! a missing content type or an unparseable body cannot turn into a 4xx.
//! Bodies that cannot be buffered at all (over the body limit, aborted
//! uploads) are recorded as an empty notification and still acknowledged.

use axum::{
    Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    routing::post,
};

use crate::state::AppState;

/// POST {NOTIFY_PATH} - Accept a provider notification.
///
/// # Response
///
/// - 200 OK: `Notification received`, for every body
async fn receive_notification(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, &'static str) {
    let ack = match body {
        Ok(body) => state.receiver().receive(&body),
        Err(rejection) => {
            tracing::warn!(
                error = %rejection,
                rejected_status = %rejection.status(),
                "notification body could not be read"
            );
            state.receiver().receive(&[])
        }
    };
    let status = StatusCode::from_u16(ack.status()).unwrap_or(StatusCode::OK);
    (status, ack.body())
}

/// Build notification routes mounted at `path`.
pub fn routes(path: &str) -> Router<AppState> {
    Router::new().route(path, post(receive_notification))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, header};
    use http_body_util::BodyExt;
    use notify_core::{CapturingSink, NotificationKind};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ServerConfig;

    fn test_app() -> (Arc<CapturingSink>, Router) {
        let sink = Arc::new(CapturingSink::new());
        let state = AppState::with_sink(ServerConfig::default(), sink.clone());
        (sink, crate::routes::build_router(state))
    }

    async fn post_body(app: Router, body: &'static str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/notifications")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_account_deleted() {
        let (sink, app) = test_app();
        let (status, body) =
            post_body(app, r#"{"notification_type":"ACCOUNT_DELETED","sub":"user-42"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Notification received");
        assert_eq!(sink.messages(), vec!["account deleted for user: user-42".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_type_still_acknowledged() {
        let (sink, app) = test_app();
        let (status, body) =
            post_body(app, r#"{"notification_type":"SOMETHING_NEW","sub":"user-7"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Notification received");
        assert_eq!(
            sink.records()[0].kind,
            NotificationKind::Unknown("SOMETHING_NEW".into())
        );
    }

    #[tokio::test]
    async fn test_garbage_body_still_acknowledged() {
        let (sink, app) = test_app();
        let (status, body) = post_body(app, "<xml>nope</xml>").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Notification received");
        assert_eq!(sink.messages(), vec!["unknown notification type: ".to_string()]);
    }

    #[tokio::test]
    async fn test_oversized_body_still_acknowledged() {
        let (sink, app) = test_app();
        let body = format!(
            r#"{{"notification_type":"ACCOUNT_DELETED","sub":"user-42","padding":"{}"}}"#,
            "x".repeat(3 * 1024 * 1024)
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/notifications")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Notification received");

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, NotificationKind::Unknown(String::new()));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_accepted() {
        let (sink, app) = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/notifications")
            .body(Body::from(r#"{"notification_type":"EMAIL_FORWARDING_ENABLED","sub":"u"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sink.messages(), vec!["email forwarding enabled for user: u".to_string()]);
    }

    #[tokio::test]
    async fn test_get_is_rejected() {
        let (sink, app) = test_app();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/notifications")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["code"], "METHOD_NOT_ALLOWED");
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let (_sink, app) = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/nope")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_path() {
        let sink = Arc::new(CapturingSink::new());
        let config = ServerConfig {
            notify_path: "/apple/notifications".to_string(),
            ..ServerConfig::default()
        };
        let app = crate::routes::build_router(AppState::with_sink(config, sink.clone()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/apple/notifications")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sink.len(), 1);
    }
}
