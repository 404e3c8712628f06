//! A [`Transport`] that delivers submissions to an in-process router.

use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use http::Method;

use signup_rs_client::{Transport, TransportResponse};
use signup_rs_core::SignupError;

use crate::client::TestClient;

/// Posts submissions through a [`TestClient`] instead of the network.
#[derive(Clone)]
pub struct RouterTransport {
    client: TestClient,
    path: String,
    delay: Option<Duration>,
}

impl RouterTransport {
    /// Delivers submissions to `path` on `app`.
    pub fn new(app: Router, path: impl Into<String>) -> Self {
        Self {
            client: TestClient::new(app),
            path: path.into(),
            delay: None,
        }
    }

    /// Waits `delay` before each delivery.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn send(&self, body: String) -> Result<TransportResponse, SignupError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let response = self
            .client
            .request(
                Method::POST,
                &self.path,
                Some("application/x-www-form-urlencoded"),
                Some("application/json"),
                body.into_bytes(),
            )
            .await;
        Ok(TransportResponse::new(response.status_code(), response.text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_rs_core::Settings;
    use signup_rs_http::SignupApp;

    #[tokio::test]
    async fn test_router_transport_returns_status_and_body() {
        let app = SignupApp::new(Settings::default()).into_axum_router();
        let transport = RouterTransport::new(app, "/");
        let response = transport
            .send("name=Al&email=al%40x.com&age=18".to_string())
            .await
            .unwrap();
        assert_eq!(response, TransportResponse::new(200, r#"{"success":true}"#));
    }
}
