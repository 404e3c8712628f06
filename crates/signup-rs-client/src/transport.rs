//! Transports carry an encoded submission to the server.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use signup_rs_core::SignupError;

/// The raw answer to a submission: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a form-encoded submission and returns the server's answer.
///
/// Implementations report connection-level problems as
/// [`SignupError::TransportError`]; any status code is a successful send.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` (`application/x-www-form-urlencoded`).
    async fn send(&self, body: String) -> Result<TransportResponse, SignupError>;
}

/// Posts submissions to a URL over HTTP.
///
/// # Examples
///
/// ```no_run
/// use signup_rs_client::transport::{HttpTransport, Transport};
///
/// # async fn example() -> Result<(), signup_rs_core::SignupError> {
/// let transport = HttpTransport::new("http://127.0.0.1:8000/");
/// let response = transport.send("name=Al&email=al%40x.com&age=18".to_string()).await?;
/// assert_eq!(response.status, 200);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Creates a transport using a custom client.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: String) -> Result<TransportResponse, SignupError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SignupError::TransportError(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SignupError::TransportError(format!("failed to read response body: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}
