//! # signup-rs-core
//!
//! Core types, settings, and error types for the signup-rs workspace.
//! This crate has no web dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Server and client configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{SignupError, SignupResult, ValidationError};
pub use settings::Settings;
