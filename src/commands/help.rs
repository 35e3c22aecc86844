//! Usage text generated from the registered commands and options.

use super::definitions::CommandRegistry;
use super::tokenizer::VERSION_FLAG;
use crate::config::Settings;
use crate::options::{OptionDef, OptionTable};
use crate::value::ValueKind;

/// Renders the full usage text.
pub fn render_usage(
    settings: &Settings,
    program: &str,
    commands: &CommandRegistry,
    options: &OptionTable,
) -> String {
    let mut out = String::new();

    if let Some(title) = &settings.title {
        out.push_str(&format!("{title}\n\n"));
    }

    out.push_str("Usage:\n");
    for command in commands.iter() {
        out.push_str(&format!(
            "  {} [options] {} {}\n",
            program, command.name, command.help
        ));
    }

    out.push_str("\nOptions:\n");
    for option in options.iter().filter(|o| !o.is_hidden() && o.group.is_empty()) {
        out.push_str(&option_line(option));
    }
    if let Some(path) = &settings.options_file {
        out.push_str(&format!(
            "\n  {}\n        Save (*) options to {}\n",
            settings.save_options_flag,
            path.display()
        ));
        out.push_str(&format!(
            "  {}\n        Show saved options\n",
            settings.show_options_flag
        ));
    }
    if settings.title.is_some() {
        out.push_str(&format!("  {VERSION_FLAG}\n        Show current version\n"));
    }
    out.push('\n');

    for command in commands.iter().filter(|c| !c.name.is_empty()) {
        let lines: String = options
            .iter()
            .filter(|o| !o.is_hidden() && o.group == command.name)
            .map(option_line)
            .collect();
        if !lines.is_empty() {
            out.push_str(&format!("{} options:\n{}", command.name, lines));
        }
    }

    out
}

/// Formats the two usage lines of one option.
fn option_line(option: &OptionDef) -> String {
    let mut line = format!("  -{}", option.name);
    if !option.format.is_empty() {
        line.push_str(&format!("={}", option.format));
    }
    line.push_str(&format!("\n        {}", option.help));
    if option.is_preference() {
        line.push_str(" (*)");
    }
    match option.kind() {
        ValueKind::Bool => {
            if option.default == "true" {
                line.push_str(" (default ON)");
            }
        }
        ValueKind::StringList => {}
        _ => {
            if !option.default.is_empty() {
                line.push_str(&format!(" (default {})", option.default));
            }
        }
    }
    line.push('\n');
    line
}
