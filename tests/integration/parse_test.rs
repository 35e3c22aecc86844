//! Tokenizing, value application and command dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use cmdparser::{CmdError, CmdParser, OptionFlags, ParseAction, Settings};
use pretty_assertions::assert_eq;

use super::args;

/// Records which commands ran.
fn recording_parser() -> (CmdParser, Rc<RefCell<Vec<String>>>) {
    let ran = Rc::new(RefCell::new(Vec::new()));
    let mut parser = CmdParser::default();

    let log = ran.clone();
    parser
        .command("", "", move |_| {
            log.borrow_mut().push("default".to_string());
            Ok(())
        })
        .unwrap();
    let log = ran.clone();
    parser
        .command("copy", "<src> <dst>", move |_| {
            log.borrow_mut().push("copy".to_string());
            Ok(())
        })
        .unwrap();

    (parser, ran)
}

#[test]
fn test_string_list_appends_per_occurrence() {
    let (mut parser, _) = recording_parser();
    let tags = parser
        .options_mut()
        .string_list_option("tag", "", "<tag>", "Tag", Vec::new(), OptionFlags::STANDARD)
        .unwrap();

    parser
        .parse(&args(&["prog", "-tag", "a", "-tag", "b"]), None)
        .unwrap();
    assert_eq!(
        parser.options().get(tags),
        Some(vec!["a".to_string(), "b".to_string()])
    );

    parser.parse(&args(&["prog", "-tag="]), None).unwrap();
    assert_eq!(parser.options().get(tags), Some(Vec::new()));
}

#[test]
fn test_bool_lookahead_leaves_command_word() {
    let (mut parser, ran) = recording_parser();
    let verbose = parser
        .options_mut()
        .bool_option("verbose", "", "Verbose", false, OptionFlags::STANDARD)
        .unwrap();

    let outcome = parser
        .parse(&args(&["prog", "-verbose", "copy"]), None)
        .unwrap();

    assert_eq!(parser.options().get(verbose), Some(true));
    assert_eq!(outcome.args, args(&["prog", "copy"]));
    assert_eq!(outcome.command(), Some("copy"));
    assert_eq!(*ran.borrow(), vec!["copy".to_string()]);
}

#[test]
fn test_bool_lookahead_consumes_literal() {
    let (mut parser, _) = recording_parser();
    let verbose = parser
        .options_mut()
        .bool_option("verbose", "", "Verbose", true, OptionFlags::STANDARD)
        .unwrap();

    let outcome = parser
        .parse(&args(&["prog", "-verbose", "false"]), None)
        .unwrap();

    assert_eq!(parser.options().get(verbose), Some(false));
    assert_eq!(outcome.args, args(&["prog"]));
}

#[test]
fn test_bool_explicit_and_bare_forms() {
    let (mut parser, _) = recording_parser();
    let verbose = parser
        .options_mut()
        .bool_option("verbose", "", "Verbose", false, OptionFlags::STANDARD)
        .unwrap();

    parser.parse(&args(&["prog", "-verbose=T"]), None).unwrap();
    assert_eq!(parser.options().get(verbose), Some(true));

    parser.parse(&args(&["prog", "-verbose=0"]), None).unwrap();
    assert_eq!(parser.options().get(verbose), Some(false));

    parser
        .parse(&args(&["prog", "-verbose", "-verbose=false", "-verbose"]), None)
        .unwrap();
    assert_eq!(parser.options().get(verbose), Some(true));

    let err = parser
        .parse(&args(&["prog", "-verbose=yes"]), None)
        .unwrap_err();
    assert!(matches!(err, CmdError::InvalidValue { ref value, .. } if value == "yes"));
}

#[test]
fn test_required_option_missing() {
    let (mut parser, ran) = recording_parser();
    parser
        .options_mut()
        .string_option("user", "", "<username>", "User", "", OptionFlags::REQUIRED)
        .unwrap();

    let err = parser.parse(&args(&["prog"]), None).unwrap_err();

    assert!(matches!(err, CmdError::MissingRequiredOption(ref name) if name == "user"));
    assert!(ran.borrow().is_empty());
}

#[test]
fn test_required_option_set_to_default_counts_as_missing() {
    let (mut parser, _) = recording_parser();
    parser
        .options_mut()
        .int_option("port", "", "", "Port", 80, OptionFlags::REQUIRED)
        .unwrap();

    let err = parser
        .parse(&args(&["prog", "-port", "80"]), None)
        .unwrap_err();
    assert!(matches!(err, CmdError::MissingRequiredOption(_)));

    parser.parse(&args(&["prog", "-port", "0x50"]), None).unwrap_err();
    parser.parse(&args(&["prog", "-port", "8080"]), None).unwrap();
}

#[test]
fn test_command_resolution() {
    let (mut parser, ran) = recording_parser();
    parser
        .options_mut()
        .bool_option("x", "", "X", false, OptionFlags::STANDARD)
        .unwrap();

    parser.parse(&args(&["prog", "copy", "-x"]), None).unwrap();
    parser.parse(&args(&["prog", "-x"]), None).unwrap();

    assert_eq!(
        *ran.borrow(),
        vec!["copy".to_string(), "default".to_string()]
    );
}

#[test]
fn test_unknown_and_missing_command() {
    let mut parser = CmdParser::default();
    parser.command("copy", "", |_| Ok(())).unwrap();

    let err = parser.parse(&args(&["prog", "cpy"]), None).unwrap_err();
    assert_eq!(err.to_string(), "cpy is not a valid command");

    let err = parser.parse(&args(&["prog"]), None).unwrap_err();
    match err {
        CmdError::MissingCommand { usage } => assert!(usage.contains("prog [options] copy")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_literal_mode() {
    let (mut parser, _) = recording_parser();
    let a = parser
        .options_mut()
        .string_option("a", "", "", "A", "", OptionFlags::STANDARD)
        .unwrap();

    let outcome = parser
        .parse(&args(&["prog", "-a", "1", "--", "-b", "-h"]), None)
        .unwrap();

    assert_eq!(parser.options().get(a), Some("1".to_string()));
    assert_eq!(outcome.args, args(&["prog", "-b", "-h"]));
}

#[test]
fn test_unknown_option_names_flag() {
    let (mut parser, ran) = recording_parser();
    let err = parser
        .parse(&args(&["prog", "-frobnicate=1"]), None)
        .unwrap_err();

    assert!(matches!(err, CmdError::UnknownOption(ref name) if name == "frobnicate"));
    assert!(err.to_string().contains("-frobnicate"));
    assert!(ran.borrow().is_empty());
}

#[test]
fn test_invalid_value_names_option_and_text() {
    let (mut parser, _) = recording_parser();
    parser
        .options_mut()
        .int_option("size", "", "<MiB>", "Size", 0, OptionFlags::STANDARD)
        .unwrap();

    let err = parser
        .parse(&args(&["prog", "-size", "99999999999999999999"]), None)
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("size"), "{text}");
    assert!(text.contains("99999999999999999999"), "{text}");
}

#[test]
fn test_failed_parse_keeps_earlier_values() {
    let (mut parser, ran) = recording_parser();
    let name = parser
        .options_mut()
        .string_option("name", "", "", "Name", "", OptionFlags::STANDARD)
        .unwrap();
    parser
        .options_mut()
        .float_option("ratio", "", "", "Ratio", 0.0, OptionFlags::STANDARD)
        .unwrap();

    let err = parser
        .parse(&args(&["prog", "-name", "kept", "-ratio", "half"]), None)
        .unwrap_err();

    assert!(matches!(err, CmdError::InvalidValue { .. }));
    assert_eq!(parser.options().get(name), Some("kept".to_string()));
    assert!(ran.borrow().is_empty());
}

#[test]
fn test_help_stops_parsing() {
    let (mut parser, ran) = recording_parser();
    let outcome = parser
        .parse(&args(&["prog", "-?", "-unknown"]), None)
        .unwrap();

    match outcome.action {
        ParseAction::Help(usage) => assert!(usage.starts_with("Usage:\n")),
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(ran.borrow().is_empty());
}

#[test]
fn test_preference_flags_need_options_file() {
    let (mut parser, _) = recording_parser();
    let err = parser
        .parse(&args(&["prog", "-saveoptions"]), None)
        .unwrap_err();
    assert!(matches!(err, CmdError::UnknownOption(ref name) if name == "saveoptions"));
}

#[test]
fn test_handler_error_propagates() {
    let mut parser = CmdParser::new(Settings::default());
    parser
        .command("", "", |_| Err("nothing to do".into()))
        .unwrap();

    let err = parser.parse(&args(&["prog"]), None).unwrap_err();
    assert!(matches!(err, CmdError::CommandFailed { ref command, .. } if command.is_empty()));
}
