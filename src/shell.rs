//! Runs a parser against real files and an output stream.
//!
//! [`CmdParser::parse`] only trades in bytes and text. This module reads the
//! preferences file before parsing, writes usage, version and preference
//! output, and saves the preferences file when asked to.

use std::io::Write;

use tracing::debug;

use crate::commands::output::{ParseAction, ParseOutcome};
use crate::error::{CmdError, Result};
use crate::parser::CmdParser;
use crate::persistence::{load_preferences, save_preferences};

/// Parses `args`, performing preference file I/O and writing any output to
/// `out`.
///
/// When no command can be found the usage text is written before the error
/// is returned.
pub fn run(parser: &mut CmdParser, args: &[String], out: &mut impl Write) -> Result<ParseOutcome> {
    let options_file = parser.settings().options_file.clone();

    let saved = match &options_file {
        Some(path) => load_preferences(path)?,
        None => None,
    };

    let outcome = match parser.parse(args, saved.as_deref()) {
        Ok(outcome) => outcome,
        Err(CmdError::MissingCommand { usage }) => {
            write_text(out, &usage)?;
            return Err(CmdError::MissingCommand { usage });
        }
        Err(e) => return Err(e),
    };

    match &outcome.action {
        ParseAction::Help(usage) => write_text(out, usage)?,
        ParseAction::Version(title) => write_text(out, &format!("{title}\n"))?,
        ParseAction::ShowPreferences(bytes) => {
            out.write_all(bytes).map_err(CmdError::Output)?;
            write_text(out, "\n")?;
        }
        ParseAction::SavePreferences(bytes) => {
            if let Some(path) = &options_file {
                save_preferences(path, bytes)?;
                write_text(out, &format!("Options saved to {}\n", path.display()))?;
            }
        }
        ParseAction::Dispatched { command } => {
            debug!("Command {:?} finished", command);
        }
    }

    Ok(outcome)
}

fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).map_err(CmdError::Output)
}
