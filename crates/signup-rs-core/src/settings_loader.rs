//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `SIGNUP_DEBUG` | `debug` |
//! | `SIGNUP_LOG_LEVEL` | `log_level` |
//! | `SIGNUP_HOST` | `host` |
//! | `SIGNUP_PORT` | `port` |
//! | `SIGNUP_SUBMIT_PATH` | `submit_path` |
//! | `SIGNUP_MAX_BODY_BYTES` | `max_body_bytes` |
//! | `SIGNUP_SUBMIT_TIMEOUT_MS` | `submit_timeout_ms` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use signup_rs_core::settings_loader;
//!
//! // Load from TOML
//! let settings = settings_loader::from_toml_file("config/signup.toml").unwrap();
//!
//! // Pick the format from the file extension and apply environment overrides
//! let settings = settings_loader::from_file_with_env("config/signup.json").unwrap();
//! ```

use std::path::Path;
use std::str::FromStr;

use crate::error::SignupError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, SignupError> {
    // Merge through serde_json so that missing keys keep their defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| SignupError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, SignupError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SignupError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, SignupError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| SignupError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, SignupError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SignupError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a `.toml` or `.json` file, chosen by extension, and
/// then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error for an unsupported extension, an unreadable file, or
/// malformed content.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, SignupError> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => from_toml_file_with_env(path),
        Some("json") => from_json_file_with_env(path),
        _ => Err(SignupError::ConfigurationError(format!(
            "Unsupported settings file '{}': expected a .toml or .json extension",
            path.display()
        ))),
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean values "true", "1" and "yes" (any case) enable `debug`; anything
/// else disables it. Numeric values that fail to parse are ignored with a
/// warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("SIGNUP_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("SIGNUP_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("SIGNUP_HOST") {
        settings.host = val;
    }

    if let Some(port) = parse_env("SIGNUP_PORT") {
        settings.port = port;
    }

    if let Ok(val) = std::env::var("SIGNUP_SUBMIT_PATH") {
        settings.submit_path = val;
    }

    if let Some(limit) = parse_env("SIGNUP_MAX_BODY_BYTES") {
        settings.max_body_bytes = limit;
    }

    if let Some(timeout) = parse_env("SIGNUP_SUBMIT_TIMEOUT_MS") {
        settings.submit_timeout_ms = timeout;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %val, "ignoring unparseable environment override");
            None
        }
    }
}

fn read_config(path: &Path, format: &str) -> Result<String, SignupError> {
    std::fs::read_to_string(path).map_err(|e| {
        SignupError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, SignupError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        SignupError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        SignupError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            port = 9000
            submit_path = "/signup"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.submit_path, "/signup");
        // Defaults preserved
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.submit_timeout_ms, 10_000);
    }

    #[test]
    fn test_from_toml_str_extra_table() {
        let toml = r#"
            [extra]
            banner = "Create your account"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(
            settings.extra.get("banner"),
            Some(&serde_json::json!("Create your account"))
        );
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.port, 8000);
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(SignupError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str(r#"port = "eighty""#);
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "debug": false,
            "log_level": "debug",
            "submit_timeout_ms": 2500
        }"#;

        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.submit_timeout_ms, 2500);
        assert_eq!(settings.submit_path, "/");
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert!(settings.debug);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signup.toml");
        std::fs::write(&path, "port = 8123\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.port, 8123);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signup.json");
        std::fs::write(&path, r#"{"host": "0.0.0.0"}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.host, "0.0.0.0");
    }

    #[test]
    fn test_from_file_with_env_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("a.toml");
        let json_path = dir.path().join("a.json");
        std::fs::write(&toml_path, "max_body_bytes = 1024\n").unwrap();
        std::fs::write(&json_path, r#"{"max_body_bytes": 2048}"#).unwrap();

        assert_eq!(from_file_with_env(&toml_path).unwrap().max_body_bytes, 1024);
        assert_eq!(from_file_with_env(&json_path).unwrap().max_body_bytes, 2048);
    }

    #[test]
    fn test_from_file_with_env_unsupported_extension() {
        let err = from_file_with_env("settings.yaml").unwrap_err();
        assert!(err.to_string().contains("Unsupported settings file"));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/signup.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    // ── Environment overrides ───────────────────────────────────────
    //
    // Each test owns a distinct variable so they can run in parallel.

    #[test]
    fn test_apply_env_overrides_debug() {
        let mut settings = Settings::default();
        std::env::set_var("SIGNUP_DEBUG", "0");
        apply_env_overrides(&mut settings);
        assert!(!settings.debug);
        std::env::remove_var("SIGNUP_DEBUG");
    }

    #[test]
    fn test_apply_env_overrides_log_level() {
        let mut settings = Settings::default();
        std::env::set_var("SIGNUP_LOG_LEVEL", "trace");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.log_level, "trace");
        std::env::remove_var("SIGNUP_LOG_LEVEL");
    }

    #[test]
    fn test_apply_env_overrides_port() {
        let mut settings = Settings::default();
        std::env::set_var("SIGNUP_PORT", "8088");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.port, 8088);
        std::env::remove_var("SIGNUP_PORT");
    }

    #[test]
    fn test_apply_env_overrides_invalid_timeout_is_ignored() {
        let mut settings = Settings::default();
        std::env::set_var("SIGNUP_SUBMIT_TIMEOUT_MS", "soon");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.submit_timeout_ms, 10_000);
        std::env::remove_var("SIGNUP_SUBMIT_TIMEOUT_MS");
    }

    #[test]
    fn test_apply_env_overrides_body_limit() {
        let mut settings = Settings::default();
        std::env::set_var("SIGNUP_MAX_BODY_BYTES", " 4096 ");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.max_body_bytes, 4096);
        std::env::remove_var("SIGNUP_MAX_BODY_BYTES");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": 1, "b": {"c": 2, "d": 3}});
        let over = serde_json::json!({"b": {"c": 20}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": 1, "b": {"c": 20, "d": 3}}));
    }
}
