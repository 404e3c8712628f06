//! # signup-rs
//!
//! A signup form (name, email, age) whose validation rules are declared once
//! and enforced identically by the server and the client.
//!
//! This is the meta-crate that re-exports the member crates. Depend on
//! `signup-rs` for everything, or on individual crates for finer control.
//!
//! ```
//! use signup_rs::forms::{signup_schema, FormValues};
//!
//! let raw = FormValues::new()
//!     .with("name", "Al")
//!     .with("email", "al@x.com")
//!     .with("age", "18");
//! assert!(signup_schema().validate(&raw).is_valid());
//! ```

/// Settings, errors, and logging.
pub use signup_rs_core as core;

/// Schema, validation, and submission outcomes.
pub use signup_rs_forms as forms;

/// Form codec, submission handler, and the axum application.
#[cfg(feature = "http")]
pub use signup_rs_http as http;

/// Form controller and transports.
#[cfg(feature = "client")]
pub use signup_rs_client as client;

/// Management commands.
#[cfg(feature = "cli")]
pub use signup_rs_cli as cli;

/// Test client, router transport, and live server.
#[cfg(feature = "testing")]
pub use signup_rs_test as test;

// Third-party re-exports
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;
