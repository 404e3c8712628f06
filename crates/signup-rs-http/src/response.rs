//! HTTP responses for the signup endpoints.
//!
//! [`HttpResponse`] carries a status, headers, a content type and a text
//! body, and converts into an axum response via [`IntoResponse`].

use axum::body::Body;
use axum::response::IntoResponse;
use http::header::{HeaderMap, HeaderName, HeaderValue, ALLOW, CONTENT_TYPE};
use http::StatusCode;

use signup_rs_core::SignupError;

/// An HTTP response with a text body.
///
/// # Examples
///
/// ```
/// use signup_rs_http::HttpResponse;
///
/// let response = HttpResponse::html(http::StatusCode::OK, "<p>hi</p>");
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.content_type(), "text/html; charset=utf-8");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    content_type: String,
    body: String,
}

impl HttpResponse {
    /// Creates a response with the given status, content type and body.
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    /// Creates an HTML response.
    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, "text/html; charset=utf-8", body)
    }

    /// Creates a plain-text response.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, "text/plain; charset=utf-8", body)
    }

    /// Serializes `data` as a JSON response.
    ///
    /// A serialization failure becomes a 500 plain-text response.
    pub fn json<T: serde::Serialize>(status: StatusCode, data: &T) -> Self {
        match serde_json::to_string(data) {
            Ok(json) => Self::new(status, "application/json", json),
            Err(e) => Self::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("JSON serialization error: {e}"),
            ),
        }
    }

    /// Creates a 405 response for `method`, listing the permitted methods in `Allow`.
    pub fn not_allowed(method: &str, permitted_methods: &[&str]) -> Self {
        let allowed = permitted_methods.join(", ");
        let mut response = Self::from_error(&SignupError::MethodNotAllowed(format!(
            "{method} (permitted: {allowed})"
        )));
        if let Ok(value) = HeaderValue::from_str(&allowed) {
            response.headers.insert(ALLOW, value);
        }
        response
    }

    /// Creates a plain-text response for an error, using its status code.
    pub fn from_error(error: &SignupError) -> Self {
        let status =
            StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::text(status, error.to_string())
    }

    /// Sets a header, replacing any existing value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Returns the status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the extra headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Ok(ct) = HeaderValue::from_str(&self.content_type) {
            response.headers_mut().insert(CONTENT_TYPE, ct);
        }
        for (key, value) in &self.headers {
            response.headers_mut().insert(key, value.clone());
        }
        response
    }
}
