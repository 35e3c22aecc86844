//! cmdparser - a declarative command line parser.
//!
//! Register typed options and named commands once, then hand the process
//! arguments to [`CmdParser::parse`]. Option values are updated in place,
//! the selected command runs, and options flagged as preferences can be
//! saved to and loaded from a JSON document.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parser;
pub mod persistence;
pub mod shell;
pub mod value;

pub use commands::{CommandContext, ParseAction, ParseOutcome};
pub use config::Settings;
pub use error::{BoxError, CmdError, Result};
pub use options::{OptionFlags, OptionHandle, OptionRegistry, OptionTable};
pub use parser::CmdParser;
pub use value::{TypedValue, ValueKind};
