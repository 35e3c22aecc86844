//! Command definitions and the command registry.
//!
//! A command is a named action selected by the second positional argument.
//! One command may use the empty name; it runs when no other command matches.

use crate::error::{BoxError, CmdError, Result};
use crate::options::OptionTable;

/// Handler invoked when its command is selected.
pub type CommandHandler = Box<dyn FnMut(&CommandContext<'_>) -> std::result::Result<(), BoxError>>;

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    /// Name of the command being run. Empty for the default command.
    pub command: &'a str,
    /// Parsed option values.
    pub options: &'a OptionTable,
    /// Positional arguments, starting with the program name.
    pub args: &'a [String],
}

/// Definition of a command.
pub struct CommandDef {
    /// Command name. Empty for the default command.
    pub name: String,
    /// Text shown next to the command in usage.
    pub help: String,
    handler: CommandHandler,
}

impl std::fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// All commands known to a parser, in registration order.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command. Names must be unique, including the empty name.
    pub fn register(
        &mut self,
        name: &str,
        help: &str,
        handler: impl FnMut(&CommandContext<'_>) -> std::result::Result<(), BoxError> + 'static,
    ) -> Result<()> {
        if self.position(name).is_some() {
            return Err(CmdError::DuplicateCommand(name.to_string()));
        }
        self.commands.push(CommandDef {
            name: name.to_string(),
            help: help.to_string(),
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Returns the registration index of a command.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.commands.iter().position(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDef> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs the command at `index`, wrapping a handler failure.
    pub(crate) fn invoke(&mut self, index: usize, ctx: &CommandContext<'_>) -> Result<()> {
        let Some(command) = self.commands.get_mut(index) else {
            return Ok(());
        };
        (command.handler)(ctx).map_err(|source| CmdError::CommandFailed {
            command: command.name.clone(),
            source,
        })
    }
}
