//! Settings for signup-rs.
//!
//! [`Settings`] holds the configuration of the server and of the client-side
//! submission machinery. The validation contract itself never reads settings.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SignupError;

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use signup_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.bind_addr(), "127.0.0.1:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,

    // ── Server ───────────────────────────────────────────────────────

    /// The interface the server binds to.
    pub host: String,
    /// The port the server binds to.
    pub port: u16,
    /// The path serving both the form page (GET) and the submission action (POST).
    pub submit_path: String,
    /// The largest accepted request body, in bytes.
    pub max_body_bytes: usize,

    // ── Client ───────────────────────────────────────────────────────

    /// How long a client waits for a submission outcome, in milliseconds.
    pub submit_timeout_ms: u64,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            host: "127.0.0.1".to_string(),
            port: 8000,
            submit_path: "/".to_string(),
            max_body_bytes: 16 * 1024,
            submit_timeout_ms: 10_000,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the `host:port` pair the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the client submission timeout.
    pub const fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// Checks the settings for values the server cannot run with.
    pub fn validate(&self) -> Result<(), SignupError> {
        if self.submit_timeout_ms == 0 {
            return Err(SignupError::ConfigurationError(
                "submit_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(SignupError::ConfigurationError(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if !self.submit_path.starts_with('/') {
            return Err(SignupError::ConfigurationError(format!(
                "submit_path must start with '/', got '{}'",
                self.submit_path
            )));
        }
        Ok(())
    }
}
