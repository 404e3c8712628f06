//! HTTP test client for signup-rs.
//!
//! [`TestClient`] sends simulated requests through an axum [`Router`] without
//! opening a socket, and [`TestResponse`] exposes the result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use signup_rs_core::Settings;
//! use signup_rs_http::SignupApp;
//! use signup_rs_test::client::TestClient;
//!
//! async fn example() {
//!     let client = TestClient::new(SignupApp::new(Settings::default()).into_axum_router());
//!     let response = client.post_form("/", "name=Al&email=al%40x.com&age=18").await;
//!     assert_eq!(response.status_code(), 200);
//! }
//! ```

use axum::body::{Body, Bytes};
use axum::Router;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use signup_rs_core::SignupError;

/// The `Accept` header a browser sends for a page navigation.
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A client for simulated requests against an axum router.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Wraps the given router.
    pub const fn new(app: Router) -> Self {
        Self { app }
    }

    /// Sends a `GET`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None, None, Vec::new()).await
    }

    /// Sends a form-encoded `POST` with no `Accept` header.
    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Method::POST,
            path,
            Some("application/x-www-form-urlencoded"),
            None,
            body.as_bytes().to_vec(),
        )
        .await
    }

    /// Sends a form-encoded `POST` the way a browser submits a form.
    pub async fn post_form_as_browser(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Method::POST,
            path,
            Some("application/x-www-form-urlencoded"),
            Some(BROWSER_ACCEPT),
            body.as_bytes().to_vec(),
        )
        .await
    }

    /// Sends a request with an arbitrary method and no body.
    pub async fn method(&self, method: Method, path: &str) -> TestResponse {
        self.request(method, path, None, None, Vec::new()).await
    }

    /// Sends a request with the given headers and body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        accept: Option<&str>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        let req = builder
            .body(Body::from(body))
            .expect("request builder should not fail");

        self.send(req).await
    }

    /// Sends a prepared request through the router.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("router should not error");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .map_or_else(|_| Bytes::new(), http_body_util::Collected::to_bytes);

        TestResponse {
            status,
            headers,
            body: body.to_vec(),
        }
    }
}

/// The response to a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// The status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw body.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Returns the body as (lossy) UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, SignupError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| SignupError::SerializationError(e.to_string()))
    }

    /// Returns the numeric status code.
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns `true` if the body contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.text().contains(text)
    }
}
