//! # signup-rs-cli
//!
//! Management commands for signup-rs and the `signup` binary.
//!
//! ```rust
//! use signup_rs_cli::command::CommandRegistry;
//! use signup_rs_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! assert_eq!(registry.list_commands(), vec!["check", "runserver", "submit", "validate"]);
//! ```

// - result_large_err: SignupError is the workspace-wide error type
// - unused_async: command handlers keep one async signature
#![allow(clippy::result_large_err)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

use std::path::Path;

use signup_rs_core::{settings_loader, SignupError, Settings};

pub use command::{CommandRegistry, ManagementCommand};

/// Loads settings from `path` (TOML or JSON by extension) with `SIGNUP_*`
/// overrides applied, or from defaults and the environment when no file is
/// given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SignupError> {
    match path {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}
