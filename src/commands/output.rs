//! Transport-agnostic parse outcomes.
//!
//! Parsing never prints. It reports what happened and hands any text or
//! bytes to the caller, which decides where they go.

/// What a successful parse did.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseAction {
    /// A help alias was given. Carries the usage text.
    Help(String),

    /// The version flag was given. Carries the title.
    Version(String),

    /// The show preferences flag was given. Carries the serialized document.
    ShowPreferences(Vec<u8>),

    /// The save preferences flag was given. Carries the serialized document
    /// to be written to the preferences file.
    SavePreferences(Vec<u8>),

    /// A command handler ran to completion.
    Dispatched {
        /// Name of the command. Empty for the default command.
        command: String,
    },
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Arguments not consumed as flags or flag values, starting with the
    /// program name.
    pub args: Vec<String>,
    /// What the parse did.
    pub action: ParseAction,
}

impl ParseOutcome {
    pub fn new(args: Vec<String>, action: ParseAction) -> Self {
        Self { args, action }
    }

    /// Returns the dispatched command name, if a command ran.
    pub fn command(&self) -> Option<&str> {
        match &self.action {
            ParseAction::Dispatched { command } => Some(command),
            _ => None,
        }
    }
}
