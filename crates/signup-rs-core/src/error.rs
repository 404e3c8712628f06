//! Core error types for signup-rs.
//!
//! There are two families of errors:
//!
//! - [`ValidationError`]: a single field failed its declared constraints. These
//!   are ordinary data; they travel inside validation results and submission
//!   outcomes and are never propagated as failures of the request itself.
//! - [`SignupError`]: everything else (configuration, transport, timeouts,
//!   protocol misuse). Each variant maps to an HTTP status code via
//!   [`SignupError::status_code`].

use std::fmt;

use thiserror::Error;

/// A field-level validation failure.
///
/// Carries the name of the offending field, the human-readable message shown
/// beneath the input, and a short code identifying the kind of failure
/// (e.g. `"required"`, `"min_length"`, `"invalid_email"`).
///
/// # Examples
///
/// ```
/// use signup_rs_core::error::ValidationError;
///
/// let err = ValidationError::new("name", "Name should have at least 2 letters", "min_length");
/// assert_eq!(err.field, "name");
/// assert_eq!(err.to_string(), "name: Name should have at least 2 letters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The name of the field that failed.
    pub field: String,
    /// The message displayed to the user.
    pub message: String,
    /// A short code identifying the failed check.
    pub code: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` for a field.
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Creates the error reported for a field that has no value at all.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "Required", "required")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for signup-rs.
///
/// Covers failures of the surrounding machinery. Field validation failures
/// are not represented here; see [`ValidationError`].
#[derive(Error, Debug)]
pub enum SignupError {
    // ── HTTP errors ──────────────────────────────────────────────────

    /// HTTP 405 Method Not Allowed.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// HTTP 413 Payload Too Large.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// HTTP 500 Internal Server Error.
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    // ── Form state ───────────────────────────────────────────────────

    /// A field name that the schema does not declare.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A submission was started while another one is still pending.
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Transport ────────────────────────────────────────────────────

    /// The request could not be delivered or the response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The request did not complete within the configured timeout.
    #[error("Timed out after {0} ms")]
    Timeout(u64),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SignupError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `UnknownField` -> 400
    /// - `MethodNotAllowed` -> 405
    /// - `SubmissionInFlight` -> 409
    /// - `PayloadTooLarge` -> 413
    /// - `TransportError` -> 502
    /// - `Timeout` -> 504
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UnknownField(_) => 400,
            Self::MethodNotAllowed(_) => 405,
            Self::SubmissionInFlight => 409,
            Self::PayloadTooLarge(_) => 413,
            Self::TransportError(_) => 502,
            Self::Timeout(_) => 504,
            Self::InternalServerError(_)
            | Self::ConfigurationError(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for SignupError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, SignupError>`.
pub type SignupResult<T> = Result<T, SignupError>;
