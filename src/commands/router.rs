//! Command resolution.
//!
//! The command is the second positional argument (the first is the program
//! name). A matching named command wins, otherwise the default command runs.

use super::definitions::CommandRegistry;

/// Where a parse should be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Run the command at this registry index.
    Command(usize),
    /// No command token and no default command.
    Missing,
    /// A command token matched nothing and there is no default command.
    Unknown(String),
}

/// Resolves the command to run from the positional arguments.
pub fn resolve(commands: &CommandRegistry, args: &[String]) -> Route {
    let token = args.get(1).map(String::as_str);

    if let Some(index) = token.and_then(|name| commands.position(name)) {
        return Route::Command(index);
    }
    if let Some(index) = commands.position("") {
        return Route::Command(index);
    }

    match token {
        Some(name) => Route::Unknown(name.to_string()),
        None => Route::Missing,
    }
}
