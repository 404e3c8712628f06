//! The signup web application.
//!
//! [`SignupApp`] combines settings, a schema and a [`SubmissionSink`] into an
//! axum router serving one path:
//!
//! - `GET` renders the form page with defaults
//! - `POST` handles a form-encoded submission and answers with the JSON
//!   outcome, or re-renders the page when the client prefers HTML
//! - any other method is answered with `405` and an `Allow` header
//!
//! # Examples
//!
//! ```no_run
//! use signup_rs_core::Settings;
//! use signup_rs_http::SignupApp;
//!
//! # async fn example() -> Result<(), signup_rs_core::SignupError> {
//! let app = SignupApp::new(Settings::default());
//! app.run("127.0.0.1:8000").await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use http::header::{HeaderName, HeaderValue, ACCEPT};
use http::{Method, StatusCode};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::Instrument;

use signup_rs_core::logging::request_span;
use signup_rs_core::{SignupError, Settings};
use signup_rs_forms::page::render_form_page;
use signup_rs_forms::{signup_schema, FieldErrors, Schema, SubmissionOutcome};

use crate::handler::{handle_submission, SubmissionSink, TracingSink};
use crate::querydict::QueryDict;
use crate::response::HttpResponse;

/// The header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const PERMITTED_METHODS: &[&str] = &["GET", "HEAD", "POST"];

/// The signup application.
pub struct SignupApp {
    settings: Settings,
    schema: Arc<Schema>,
    sink: Arc<dyn SubmissionSink>,
}

struct AppState {
    settings: Settings,
    schema: Arc<Schema>,
    sink: Arc<dyn SubmissionSink>,
}

impl SignupApp {
    /// Creates an application serving [`signup_schema`] and logging accepted
    /// submissions through [`TracingSink`].
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            schema: Arc::new(signup_schema().clone()),
            sink: Arc::new(TracingSink),
        }
    }

    /// Replaces the schema.
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Arc::new(schema);
        self
    }

    /// Replaces the sink receiving accepted submissions.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the application settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Converts the application into an axum router.
    pub fn into_axum_router(self) -> axum::Router {
        let path = self.settings.submit_path.clone();
        let max_body_bytes = self.settings.max_body_bytes;
        let state = Arc::new(AppState {
            settings: self.settings,
            schema: self.schema,
            sink: self.sink,
        });

        axum::Router::new()
            .route(
                &path,
                get(show_form).post(submit).fallback(method_not_allowed),
            )
            .layer(RequestBodyLimitLayer::new(max_body_bytes))
            .layer(middleware::from_fn(with_request_span))
            .with_state(state)
    }

    /// Binds `addr` and serves until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::ConfigurationError`] if the address cannot be
    /// bound, or [`SignupError::IoError`] if serving fails.
    pub async fn run(self, addr: &str) -> Result<(), SignupError> {
        self.run_until(addr, std::future::pending()).await
    }

    /// Binds `addr` and serves until `shutdown` resolves.
    pub async fn run_until<F>(self, addr: &str, shutdown: F) -> Result<(), SignupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            SignupError::ConfigurationError(format!("Failed to bind to {addr}: {e}"))
        })?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), SignupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener
            .local_addr()
            .map_or_else(|_| "unknown".to_string(), |a| a.to_string());
        let path = self.settings.submit_path.clone();
        if self.settings.debug {
            tracing::info!("Starting development server at http://{local}{path}");
        } else {
            tracing::info!(addr = %local, path = %path, "server listening");
        }

        let router = self.into_axum_router();
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for SignupApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupApp")
            .field("submit_path", &self.settings.submit_path)
            .field("fields", &self.schema.fields().len())
            .field("debug", &self.settings.debug)
            .finish_non_exhaustive()
    }
}

async fn with_request_span(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = request_span(&request_id);
    let mut response = async {
        tracing::debug!(method = %request.method(), path = %request.uri().path(), "request");
        next.run(request).await
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

async fn show_form(State(state): State<Arc<AppState>>) -> HttpResponse {
    let page = render_form_page(
        &state.schema,
        &state.schema.defaults(),
        &FieldErrors::new(),
        &state.settings.submit_path,
    );
    HttpResponse::html(StatusCode::OK, page)
}

async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request<Body>,
) -> HttpResponse {
    let body = match axum::body::to_bytes(request.into_body(), state.settings.max_body_bytes).await
    {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "rejected request body");
            return HttpResponse::from_error(&SignupError::PayloadTooLarge(format!(
                "request body exceeds {} bytes",
                state.settings.max_body_bytes
            )));
        }
    };

    let form = QueryDict::parse(&String::from_utf8_lossy(&body));
    let handled = handle_submission(&state.schema, state.sink.as_ref(), &form);

    if !prefers_html(&headers) {
        return HttpResponse::json(handled.status, &handled.outcome);
    }

    let page = match &handled.outcome {
        SubmissionOutcome::Success => render_form_page(
            &state.schema,
            &state.schema.defaults(),
            &FieldErrors::new(),
            &state.settings.submit_path,
        ),
        SubmissionOutcome::Errors(errors) => render_form_page(
            &state.schema,
            &handled.submitted,
            errors,
            &state.settings.submit_path,
        ),
    };
    HttpResponse::html(handled.status, page)
}

async fn method_not_allowed(method: Method) -> impl IntoResponse {
    HttpResponse::not_allowed(method.as_str(), PERMITTED_METHODS)
}

/// Returns `true` if the `Accept` header ranks `text/html` above
/// `application/json`. A missing header prefers JSON.
pub fn prefers_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let html = media_quality(accept, "text/html");
    let json = media_quality(accept, "application/json");
    html > json
}

/// Returns the quality value an `Accept` header gives `media_type`, or `0.0`
/// if it is not listed.
fn media_quality(accept: &str, media_type: &str) -> f32 {
    accept
        .split(',')
        .filter_map(|range| {
            let mut parts = range.split(';').map(str::trim);
            let mime = parts.next()?;
            if !mime.eq_ignore_ascii_case(media_type) {
                return None;
            }
            let q = parts
                .filter_map(|p| p.strip_prefix("q="))
                .find_map(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some(q)
        })
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_prefers_html_browser_accept() {
        assert!(prefers_html(&accept(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
        )));
    }

    #[test]
    fn test_prefers_json() {
        assert!(!prefers_html(&accept("application/json")));
        assert!(!prefers_html(&accept("*/*")));
        assert!(!prefers_html(&HeaderMap::new()));
    }

    #[test]
    fn test_prefers_by_quality() {
        assert!(!prefers_html(&accept("text/html;q=0.5, application/json")));
        assert!(prefers_html(&accept("text/html, application/json;q=0.9")));
    }

    #[test]
    fn test_app_debug() {
        let app = SignupApp::new(Settings::default());
        let debug = format!("{app:?}");
        assert!(debug.contains("SignupApp"));
        assert!(debug.contains("submit_path"));
    }

    #[test]
    fn test_app_settings() {
        let settings = Settings {
            debug: false,
            ..Settings::default()
        };
        let app = SignupApp::new(settings);
        assert!(!app.settings().debug);
    }

    #[tokio::test]
    async fn test_run_invalid_address() {
        let app = SignupApp::new(Settings::default());
        let result = app.run("invalid-address").await;
        assert!(matches!(result, Err(SignupError::ConfigurationError(_))));
    }
}
