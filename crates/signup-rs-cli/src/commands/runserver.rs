//! The `runserver` command.
//!
//! Serves the signup form until Ctrl-C.

use async_trait::async_trait;
use signup_rs_core::{SignupError, Settings};
use signup_rs_http::SignupApp;

use crate::command::ManagementCommand;

/// Starts the signup server.
///
/// Host and port default to the settings and can be overridden with
/// `--host` and `--port`.
pub struct RunserverCommand;

#[async_trait]
impl ManagementCommand for RunserverCommand {
    fn name(&self) -> &'static str {
        "runserver"
    }

    fn help(&self) -> &'static str {
        "Starts the signup server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("host")
                .long("host")
                .help("Host to bind to (defaults to the `host` setting)"),
        )
        .arg(
            clap::Arg::new("port")
                .long("port")
                .value_parser(clap::value_parser!(u16))
                .help("Port to bind to (defaults to the `port` setting)"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), SignupError> {
        settings.validate()?;

        let mut settings = settings.clone();
        if let Some(host) = matches.get_one::<String>("host") {
            settings.host.clone_from(host);
        }
        if let Some(port) = matches.get_one::<u16>("port") {
            settings.port = *port;
        }

        let addr = settings.bind_addr();
        SignupApp::new(settings)
            .run_until(&addr, shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments() {
        let cmd = RunserverCommand.add_arguments(clap::Command::new("runserver"));
        let matches = cmd
            .try_get_matches_from(["runserver", "--host", "0.0.0.0", "--port", "9000"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("host").unwrap(), "0.0.0.0");
        assert_eq!(*matches.get_one::<u16>("port").unwrap(), 9000);
    }

    #[test]
    fn test_rejects_bad_port() {
        let cmd = RunserverCommand.add_arguments(clap::Command::new("runserver"));
        assert!(cmd
            .try_get_matches_from(["runserver", "--port", "http"])
            .is_err());
    }

    #[tokio::test]
    async fn test_invalid_settings_fail_before_binding() {
        let cmd = RunserverCommand.add_arguments(clap::Command::new("runserver"));
        let matches = cmd.try_get_matches_from(["runserver"]).unwrap();
        let settings = Settings {
            submit_path: "signup".to_string(),
            ..Settings::default()
        };
        let result = RunserverCommand.handle(&matches, &settings).await;
        assert!(matches!(result, Err(SignupError::ConfigurationError(_))));
    }
}
