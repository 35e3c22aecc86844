//! The command line parser.
//!
//! [`CmdParser`] owns the settings and both registries. Options and commands
//! are registered once, then [`CmdParser::parse`] walks the arguments,
//! updates option values in place and runs the selected command.
//!
//! Parsing is not transactional: values applied before a failing argument
//! keep their new values.

use tracing::{debug, info};

use crate::commands::definitions::{CommandContext, CommandRegistry};
use crate::commands::help::render_usage;
use crate::commands::output::{ParseAction, ParseOutcome};
use crate::commands::router::{self, Route};
use crate::commands::tokenizer::{classify, lookahead_value, PreferenceFlags, Token};
use crate::config::Settings;
use crate::error::{BoxError, CmdError, Result};
use crate::options::OptionRegistry;
use crate::persistence::preferences;
use crate::value::{parse_bool, parse_list_text, TypedValue, ValueKind};

/// Version text used when no title is configured.
const NO_TITLE: &str = "No title has been set";

/// Declarative command line parser.
#[derive(Debug, Default)]
pub struct CmdParser {
    settings: Settings,
    options: OptionRegistry,
    commands: CommandRegistry,
}

impl CmdParser {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            options: OptionRegistry::new(),
            commands: CommandRegistry::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn options(&self) -> &OptionRegistry {
        &self.options
    }

    /// Mutable access for registering options and hooks.
    pub fn options_mut(&mut self) -> &mut OptionRegistry {
        &mut self.options
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    /// Registers a command. An empty name registers the default command.
    pub fn command(
        &mut self,
        name: &str,
        help: &str,
        handler: impl FnMut(&CommandContext<'_>) -> std::result::Result<(), BoxError> + 'static,
    ) -> Result<()> {
        self.commands.register(name, help, handler)
    }

    /// Renders the usage text. `argv0` names the program when no program
    /// name is configured.
    pub fn usage(&self, argv0: Option<&str>) -> String {
        let program = self.settings.program_name_or(argv0);
        render_usage(&self.settings, &program, &self.commands, self.options.table())
    }

    /// Applies a saved preferences document to the options.
    pub fn load_preferences(&mut self, bytes: &[u8]) -> Result<()> {
        preferences::deserialize(&mut self.options, bytes)
    }

    /// Serializes the preference options that differ from their defaults.
    pub fn serialize_preferences(&mut self) -> Result<Vec<u8>> {
        preferences::serialize(&mut self.options)
    }

    /// Parses `args` and dispatches to the selected command.
    ///
    /// `args[0]` is the program name. It is never scanned as a flag but is
    /// kept as the first positional argument, so the command name is the
    /// second positional argument. `preferences` is the content of the
    /// preferences file, if one exists; it is applied before any argument.
    pub fn parse(&mut self, args: &[String], preferences: Option<&[u8]>) -> Result<ParseOutcome> {
        if let Some(bytes) = preferences {
            self.load_preferences(bytes)?;
        }

        debug!("Parsing {} argument(s)", args.len());

        let argv0 = args.first().map(String::as_str);
        let mut positional: Vec<String> = args.first().cloned().into_iter().collect();

        let show_flag = self.settings.show_options_flag.clone();
        let save_flag = self.settings.save_options_flag.clone();
        let pref_flags = self.settings.options_file.as_ref().map(|_| PreferenceFlags {
            show: &show_flag,
            save: &save_flag,
        });

        let mut literal = false;
        let mut show = false;
        let mut save = false;

        let mut i = 1;
        while i < args.len() {
            let arg = &args[i];
            if literal {
                positional.push(arg.clone());
                i += 1;
                continue;
            }

            match classify(arg, pref_flags) {
                Token::Help => {
                    let usage = self.usage(argv0);
                    return Ok(ParseOutcome::new(positional, ParseAction::Help(usage)));
                }
                Token::Version => {
                    let title = self.settings.title.as_deref().unwrap_or(NO_TITLE);
                    let action = ParseAction::Version(title.to_string());
                    return Ok(ParseOutcome::new(positional, action));
                }
                Token::EndOfOptions => literal = true,
                Token::ShowOptions => show = true,
                Token::SaveOptions => save = true,
                Token::Flag { name, value } => {
                    let next = args.get(i + 1).map(String::as_str);
                    if self.apply_flag(name, value, next)? {
                        i += 1;
                    }
                }
                Token::Word(word) => positional.push(word.to_string()),
            }
            i += 1;
        }

        if show {
            let bytes = self.serialize_preferences()?;
            return Ok(ParseOutcome::new(positional, ParseAction::ShowPreferences(bytes)));
        }
        if save {
            let bytes = self.serialize_preferences()?;
            return Ok(ParseOutcome::new(positional, ParseAction::SavePreferences(bytes)));
        }

        if let Some(def) = self.options.missing_required() {
            return Err(CmdError::MissingRequiredOption(def.name.clone()));
        }

        match router::resolve(&self.commands, &positional) {
            Route::Command(index) => {
                let command = self
                    .commands
                    .iter()
                    .nth(index)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                info!("Running command {:?}", command);
                let ctx = CommandContext {
                    command: &command,
                    options: self.options.table(),
                    args: &positional,
                };
                self.commands.invoke(index, &ctx)?;
                Ok(ParseOutcome::new(
                    positional,
                    ParseAction::Dispatched { command },
                ))
            }
            Route::Missing => Err(CmdError::MissingCommand {
                usage: self.usage(argv0),
            }),
            Route::Unknown(token) => Err(CmdError::UnknownCommand(token)),
        }
    }

    /// Applies one option flag. Returns true if `next` was consumed as its
    /// value.
    fn apply_flag(&mut self, name: &str, explicit: Option<&str>, next: Option<&str>) -> Result<bool> {
        let index = self
            .options
            .table()
            .position(name)
            .ok_or_else(|| CmdError::UnknownOption(name.to_string()))?;
        let (kind, default) = match self.options.table().at(index) {
            Some(def) => (def.kind(), def.default.clone()),
            None => return Err(CmdError::UnknownOption(name.to_string())),
        };

        let mut consumed = false;
        let resolved = match (explicit, kind, lookahead_value(next)) {
            (Some(value), _, _) => Some(value.to_string()),
            // A following word that is not a boolean literal is left alone,
            // so `-verbose copy` still selects the copy command.
            (None, ValueKind::Bool, Some(value)) if parse_bool(value).is_ok() => {
                consumed = true;
                Some(value.to_string())
            }
            (None, ValueKind::Bool, _) => Some("true".to_string()),
            (None, ValueKind::StringList, None) => None,
            (None, _, Some(value)) => {
                consumed = true;
                Some(value.to_string())
            }
            (None, _, None) => Some(default.clone()),
        };

        let Some(def) = self.options.table_mut().get_mut(index) else {
            return Err(CmdError::UnknownOption(name.to_string()));
        };
        match resolved {
            // A bare list flag restores the registered contents.
            None => {
                let items = parse_list_text(&default).map_err(|source| CmdError::InvalidValue {
                    option: name.to_string(),
                    value: default.clone(),
                    source,
                })?;
                if let TypedValue::StringList(list) = &mut def.value {
                    *list = items;
                }
            }
            Some(text) if text.is_empty() => def.value.reset(),
            Some(text) => {
                def.value
                    .parse_from(&text)
                    .map_err(|source| CmdError::InvalidValue {
                        option: name.to_string(),
                        value: text.clone(),
                        source,
                    })?;
            }
        }
        debug!("Option -{} is now {:?}", name, def.value.to_text());

        self.options.fire_change(index);
        Ok(consumed)
    }
}
