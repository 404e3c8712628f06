//! Built-in management commands.

pub mod check;
pub mod runserver;
pub mod submit;
pub mod validate;

pub use check::CheckCommand;
pub use runserver::RunserverCommand;
pub use submit::SubmitCommand;
pub use validate::ValidateCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(RunserverCommand));
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(ValidateCommand));
    registry.register(Box::new(SubmitCommand));
}
