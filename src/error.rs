//! Error types for cmdparser.
//!
//! Defines the main error enum returned by registration, parsing, dispatch
//! and preference handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::ValueError;

/// Boxed error returned by command handlers and pre-save hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for cmdparser operations.
#[derive(Error, Debug)]
pub enum CmdError {
    /// An option with this name was already registered.
    #[error("Option -{0} is already registered")]
    DuplicateOption(String),

    /// A command with this name was already registered.
    #[error("Command \"{0}\" is already registered")]
    DuplicateCommand(String),

    /// A flag token matched no registered option.
    #[error("Invalid option -{0}")]
    UnknownOption(String),

    /// A supplied or defaulted value failed its type-specific parse.
    #[error("Invalid value set for option {option}: \"{value}\" ({source})")]
    InvalidValue {
        option: String,
        value: String,
        #[source]
        source: ValueError,
    },

    /// A required option still holds its default after the scan.
    #[error("Missing required option -{0}")]
    MissingRequiredOption(String),

    /// No command token and no default command. Carries the usage text.
    #[error("Missing required command")]
    MissingCommand { usage: String },

    /// A command token was present but matched no registered command.
    #[error("{0} is not a valid command")]
    UnknownCommand(String),

    /// The preferences document could not be encoded or decoded.
    #[error("Preferences error: {0}")]
    Preferences(String),

    /// A pre-save hook refused the save.
    #[error("Unable to save option {option}: {source}")]
    SaveHook {
        option: String,
        #[source]
        source: BoxError,
    },

    /// A command handler returned an error.
    #[error("Command \"{command}\" failed: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: BoxError,
    },

    /// Reading or writing the preferences file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing usage, version or preferences output failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// Parser settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CmdError {
    /// Creates a preferences error with the given message.
    pub fn preferences(msg: impl Into<String>) -> Self {
        Self::Preferences(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateOption(_) | Self::DuplicateCommand(_) => "Registration Error",
            Self::UnknownOption(_) => "Unknown Option",
            Self::InvalidValue { .. } => "Invalid Value",
            Self::MissingRequiredOption(_) => "Missing Option",
            Self::MissingCommand { .. } | Self::UnknownCommand(_) => "Command Error",
            Self::Preferences(_) | Self::SaveHook { .. } => "Preferences Error",
            Self::CommandFailed { .. } => "Command Failed",
            Self::Io { .. } | Self::Output(_) => "I/O Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

impl From<serde_json::Error> for CmdError {
    fn from(err: serde_json::Error) -> Self {
        Self::Preferences(err.to_string())
    }
}

/// Result type alias using CmdError.
pub type Result<T> = std::result::Result<T, CmdError>;
