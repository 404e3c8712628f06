//! The `submit` command.
//!
//! Fills a [`FormController`] from the command line, submits it to a running
//! server and prints what the form would show afterwards.

use std::fmt::Write as _;

use async_trait::async_trait;
use signup_rs_client::{FormController, HttpTransport};
use signup_rs_core::{SignupError, Settings};

use crate::command::ManagementCommand;

/// Submits the form to a running server.
pub struct SubmitCommand;

/// Formats the controller's state, errors and values, one per line, with
/// fields in the form's display order.
pub fn render_report(form: &FormController, layout: &[&str]) -> String {
    let mut out = format!("state: {:?}\n", form.state());
    if let Some(failure) = form.last_failure() {
        let _ = writeln!(out, "failure: {failure}");
    }
    for name in layout {
        let value = form.values().get(name).map(ToString::to_string).unwrap_or_default();
        match form.errors().get(*name) {
            Some(message) => {
                let _ = writeln!(out, "{name} = {value:?} ({message})");
            }
            None => {
                let _ = writeln!(out, "{name} = {value:?}");
            }
        }
    }
    out
}

#[async_trait]
impl ManagementCommand for SubmitCommand {
    fn name(&self) -> &'static str {
        "submit"
    }

    fn help(&self) -> &'static str {
        "Submit the signup form to a running server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("url")
                .long("url")
                .help("Submission URL (defaults to the server address in the settings)"),
        )
        .arg(clap::Arg::new("name").long("name").help("Value for `name`"))
        .arg(clap::Arg::new("email").long("email").help("Value for `email`"))
        .arg(clap::Arg::new("age").long("age").help("Value for `age`"))
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), SignupError> {
        settings.validate()?;

        let url = matches.get_one::<String>("url").map_or_else(
            || format!("http://{}{}", settings.bind_addr(), settings.submit_path),
            Clone::clone,
        );

        let mut form = FormController::signup();
        for field in ["name", "email", "age"] {
            if let Some(value) = matches.get_one::<String>(field) {
                form.set_field(field, value.as_str())?;
            }
        }

        let transport = HttpTransport::new(url);
        form.submit_with(&transport, settings.submit_timeout()).await?;

        let layout: Vec<&str> = signup_rs_forms::signup_schema()
            .layout()
            .map(|f| f.name.as_str())
            .collect();
        print!("{}", render_report(&form, &layout));

        match form.last_failure() {
            Some(failure) => Err(failure.clone().into()),
            None => Ok(()),
        }
    }
}
