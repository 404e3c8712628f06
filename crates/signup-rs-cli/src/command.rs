//! Management command framework for signup-rs.
//!
//! [`ManagementCommand`] defines one subcommand of the `signup` binary and
//! [`CommandRegistry`] collects them into a clap application.
//!
//! ## Defining a Custom Command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use signup_rs_cli::command::ManagementCommand;
//! use signup_rs_core::{SignupError, Settings};
//!
//! struct GreetCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for GreetCommand {
//!     fn name(&self) -> &str { "greet" }
//!     fn help(&self) -> &str { "Say hello" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         _settings: &Settings,
//!     ) -> Result<(), SignupError> {
//!         println!("Hello from signup-rs!");
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use signup_rs_core::{SignupError, Settings};

/// A subcommand of the `signup` binary.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// Returns the name used to invoke the command.
    fn name(&self) -> &str;

    /// Returns a short help description.
    fn help(&self) -> &str;

    /// Adds the command's arguments. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command.
    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), SignupError>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        let name = command.name().to_string();
        self.commands.insert(name, command);
    }

    /// Returns the command with the given name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level `signup` clap command with every registered
    /// subcommand and the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("signup")
            .about("signup-rs management utility")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_parser(clap::value_parser!(std::path::PathBuf))
                    .help("Settings file (.toml or .json); SIGNUP_* variables override it"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| (*name).clone());

        for (name, cmd) in entries {
            // clap wants &'static str names; commands are registered once at startup.
            let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
            let subcmd = clap::Command::new(static_name).about(cmd.help().to_string());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand named in `matches`.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), SignupError> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            SignupError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self.get(name).ok_or_else(|| {
            SignupError::ConfigurationError(format!("Unknown command: {name}"))
        })?;

        cmd.handle(sub_matches, settings).await
    }
}
