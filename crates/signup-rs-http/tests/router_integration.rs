//! Integration tests driving the signup router in-process.
//!
//! Covers:
//! 1. The form page (GET)
//! 2. JSON submissions (POST, default Accept)
//! 3. HTML re-rendering (POST, browser Accept)
//! 4. Method and body-size rejections

use std::sync::{Arc, Mutex};

use axum::body::Body;
use http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use signup_rs_core::Settings;
use signup_rs_forms::{FormValues, SubmissionOutcome};
use signup_rs_http::server::REQUEST_ID_HEADER;
use signup_rs_http::{SignupApp, SubmissionSink};

// ============================================================================
// Shared helpers
// ============================================================================

#[derive(Default)]
struct RecordingSink {
    accepted: Mutex<Vec<FormValues>>,
}

impl SubmissionSink for RecordingSink {
    fn accept(&self, data: &FormValues) {
        self.accepted.lock().unwrap().push(data.clone());
    }
}

fn router_with_sink(settings: Settings) -> (axum::Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let router = SignupApp::new(settings)
        .sink(sink.clone())
        .into_axum_router();
    (router, sink)
}

fn post(path: &str, body: &str, accept: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, http::HeaderMap, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,*/*;q=0.8";

// ============================================================================
// 1. Form page
// ============================================================================

#[tokio::test]
async fn test_get_renders_form_with_defaults() {
    let (router, _) = router_with_sink(Settings::default());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, headers, body) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(headers.contains_key(REQUEST_ID_HEADER));
    assert!(body.contains(r#"<form method="post" action="/">"#));
    assert!(body.contains(r#"name="age""#));
    assert!(body.contains(r#"value="18""#));
}

#[tokio::test]
async fn test_custom_submit_path() {
    let settings = Settings {
        submit_path: "/signup".to_string(),
        ..Settings::default()
    };
    let (router, _) = router_with_sink(settings);
    let request = Request::builder().uri("/signup").body(Body::empty()).unwrap();
    let (status, _, body) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/signup""#));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, _, _) = send(router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// 2. JSON submissions
// ============================================================================

#[tokio::test]
async fn test_post_valid_returns_success() {
    let (router, sink) = router_with_sink(Settings::default());
    let (status, headers, body) =
        send(router, post("/", "name=Al&email=al%40x.com&age=18", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let outcome: SubmissionOutcome = serde_json::from_str(&body).unwrap();
    assert_eq!(outcome, SubmissionOutcome::Success);
    assert_eq!(sink.accepted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_post_invalid_returns_errors() {
    let (router, sink) = router_with_sink(Settings::default());
    let (status, _, body) = send(
        router,
        post("/", "name=A&email=not-an-email&age=17", Some("application/json")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"errors": {
            "name": "Name should have at least 2 letters",
            "email": "Invalid email",
            "age": "You must be at least 18 to create an account",
        }})
    );
    assert!(sink.accepted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_empty_body_reports_required() {
    let (router, _) = router_with_sink(Settings::default());
    let (status, _, body) = send(router, post("/", "", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let outcome: SubmissionOutcome = serde_json::from_str(&body).unwrap();
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.len(), 3);
    assert!(errors.values().all(|m| m == "Required"));
}

// ============================================================================
// 3. HTML re-rendering
// ============================================================================

#[tokio::test]
async fn test_html_post_invalid_keeps_values_and_shows_messages() {
    let (router, _) = router_with_sink(Settings::default());
    let (status, _, body) = send(
        router,
        post("/", "name=Alice&email=a%40b.com&age=17", Some(BROWSER_ACCEPT)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains(r#"value="Alice""#));
    assert!(body.contains(r#"value="17""#));
    assert!(body.contains("You must be at least 18 to create an account"));
    assert_eq!(body.matches(r#"class="error""#).count(), 1);
}

#[tokio::test]
async fn test_html_post_valid_resets_to_defaults() {
    let (router, _) = router_with_sink(Settings::default());
    let (status, _, body) = send(
        router,
        post("/", "name=Alice&email=a%40b.com&age=30", Some(BROWSER_ACCEPT)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Alice"));
    assert!(body.contains(r#"value="18""#));
    assert!(!body.contains(r#"class="error""#));
}

// ============================================================================
// 4. Rejections
// ============================================================================

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let (router, _) = router_with_sink(Settings::default());
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(router, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ALLOW], "GET, HEAD, POST");
    assert!(body.starts_with("Method not allowed: DELETE"), "{body}");
}

#[tokio::test]
async fn test_oversized_body_is_rejected_before_validation() {
    let settings = Settings {
        max_body_bytes: 64,
        ..Settings::default()
    };
    let (router, sink) = router_with_sink(settings);
    let body = format!("name={}&email=al%40x.com&age=18", "a".repeat(200));
    let (status, _, _) = send(router, post("/", &body, None)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(sink.accepted.lock().unwrap().is_empty());
}
