//! The `check` command.
//!
//! Validates settings and prints a summary of the form schema.

use std::fmt::Write as _;

use async_trait::async_trait;
use signup_rs_core::{SignupError, Settings};
use signup_rs_forms::{signup_schema, Schema};

use crate::command::ManagementCommand;

/// Runs configuration checks.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// Severity.
    pub level: CheckLevel,
    /// What is wrong.
    pub msg: String,
    /// How to fix it, if known.
    pub hint: Option<String>,
    /// A stable identifier (e.g. "settings.E001").
    pub id: String,
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// A warning that may indicate a problem.
    Warning,
    /// An error that must be resolved before serving.
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Runs every check against `settings`.
pub fn run_checks(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if let Err(e) = settings.validate() {
        messages.push(CheckMessage {
            level: CheckLevel::Error,
            msg: e.to_string(),
            hint: None,
            id: "settings.E001".to_string(),
        });
    }

    if settings.debug && !is_loopback(&settings.host) {
        messages.push(CheckMessage {
            level: CheckLevel::Warning,
            msg: format!("DEBUG is enabled while binding to {}", settings.host),
            hint: Some("Disable debug when serving on a public interface".to_string()),
            id: "security.W001".to_string(),
        });
    }

    if settings.max_body_bytes > 0 && settings.max_body_bytes < 256 {
        messages.push(CheckMessage {
            level: CheckLevel::Warning,
            msg: format!(
                "max_body_bytes is {}; ordinary submissions may be rejected",
                settings.max_body_bytes
            ),
            hint: Some("Allow at least a few hundred bytes per request".to_string()),
            id: "http.W001".to_string(),
        });
    }

    messages
}

fn is_loopback(host: &str) -> bool {
    host == "localhost"
        || host
            .parse::<std::net::IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

/// Describes each field of `schema` in declaration order.
pub fn schema_summary(schema: &Schema) -> String {
    let mut out = String::new();
    for field in schema.fields() {
        let checks: Vec<&str> = field.constraints.iter().map(|c| c.check.code()).collect();
        let _ = writeln!(
            out,
            "{name} ({kind}, {widget}): {checks}",
            name = field.name,
            kind = field.kind,
            widget = field.widget,
            checks = if checks.is_empty() {
                "no constraints".to_string()
            } else {
                checks.join(", ")
            },
        );
    }
    out
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Validate settings and summarize the form schema"
    }

    async fn handle(
        &self,
        _matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), SignupError> {
        print!("{}", schema_summary(signup_schema()));

        let messages = run_checks(settings);
        if messages.is_empty() {
            tracing::info!("System check identified no issues");
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level == CheckLevel::Error).count();
        for msg in &messages {
            let hint_text = msg
                .hint
                .as_ref()
                .map_or(String::new(), |h| format!("\n\tHINT: {h}"));
            tracing::warn!("{} ({}): {}{}", msg.level, msg.id, msg.msg, hint_text);
        }

        tracing::info!(
            "System check identified {} issue(s) ({} error(s))",
            messages.len(),
            errors
        );

        if errors > 0 {
            return Err(SignupError::ConfigurationError(format!(
                "System check found {errors} error(s)"
            )));
        }
        Ok(())
    }
}
