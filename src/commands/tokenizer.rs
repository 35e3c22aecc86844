//! Classification of raw command line arguments.
//!
//! Recognizes:
//! - Help aliases: `-h`, `-H`, `-?`
//! - The version flag: `-version`
//! - The end of options marker: `--`
//! - The show/save preferences flags, when a preferences file is configured
//! - Option flags: `-name` and `-name=value`
//! - Everything else as a plain word

/// Help aliases that print usage and stop parsing.
pub const HELP_FLAGS: &[&str] = &["-h", "-H", "-?"];

/// Flag that prints the title and stops parsing.
pub const VERSION_FLAG: &str = "-version";

/// Marker after which every argument is positional.
pub const END_OF_OPTIONS: &str = "--";

/// A classified command line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// One of the help aliases.
    Help,
    /// The version flag.
    Version,
    /// `--`.
    EndOfOptions,
    /// The show preferences flag.
    ShowOptions,
    /// The save preferences flag.
    SaveOptions,
    /// An option flag, split at the first `=`.
    Flag {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// A positional word.
    Word(&'a str),
}

/// Names of the preference flags, present only with a preferences file.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceFlags<'a> {
    pub show: &'a str,
    pub save: &'a str,
}

/// Classifies one argument.
pub fn classify<'a>(arg: &'a str, prefs: Option<PreferenceFlags<'_>>) -> Token<'a> {
    if HELP_FLAGS.contains(&arg) {
        return Token::Help;
    }
    if arg == VERSION_FLAG {
        return Token::Version;
    }
    if arg == END_OF_OPTIONS {
        return Token::EndOfOptions;
    }
    if let Some(prefs) = prefs {
        if arg == prefs.show {
            return Token::ShowOptions;
        }
        if arg == prefs.save {
            return Token::SaveOptions;
        }
    }

    match arg.strip_prefix('-') {
        Some(flag) => match flag.split_once('=') {
            Some((name, value)) => Token::Flag {
                name,
                value: Some(value),
            },
            None => Token::Flag {
                name: flag,
                value: None,
            },
        },
        None => Token::Word(arg),
    }
}

/// Returns the next argument if it can serve as a flag value.
///
/// Arguments starting with `-` never do.
pub fn lookahead_value(next: Option<&str>) -> Option<&str> {
    next.filter(|arg| !arg.starts_with('-'))
}
