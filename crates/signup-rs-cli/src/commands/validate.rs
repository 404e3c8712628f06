//! The `validate` command.
//!
//! Runs the server-side submission handler on a form-encoded string without
//! starting a server, and prints the status and JSON outcome.

use async_trait::async_trait;
use signup_rs_core::{SignupError, Settings};
use signup_rs_forms::signup_schema;
use signup_rs_http::{handle_submission, QueryDict, TracingSink};

use crate::command::ManagementCommand;

/// Validates a submission offline.
pub struct ValidateCommand;

/// Handles `data` and returns the status code and the JSON outcome.
pub fn validate_data(data: &str) -> Result<(u16, String), SignupError> {
    let handled = handle_submission(signup_schema(), &TracingSink, &QueryDict::parse(data));
    let body = serde_json::to_string(&handled.outcome)?;
    Ok((handled.status.as_u16(), body))
}

#[async_trait]
impl ManagementCommand for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn help(&self) -> &'static str {
        "Validate a form-encoded submission without a server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("data")
                .long("data")
                .required(true)
                .help("Form-encoded body, e.g. 'name=Al&email=al%40x.com&age=18'"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        _settings: &Settings,
    ) -> Result<(), SignupError> {
        let data = matches
            .get_one::<String>("data")
            .map_or("", String::as_str);
        let (status, body) = validate_data(data)?;
        println!("{status} {body}");
        Ok(())
    }
}
