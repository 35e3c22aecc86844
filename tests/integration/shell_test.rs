//! End to end runs through the shell, using a real options file.

use cmdparser::{shell, CmdError, CmdParser, OptionFlags, ParseAction, Settings};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::args;

fn parser_with_file(dir: &TempDir) -> CmdParser {
    let path = dir.path().join("conf").join("options.json");
    let mut parser = CmdParser::new(
        Settings::default()
            .with_title("shell-test 1.0")
            .with_options_file(path),
    );
    parser
        .options_mut()
        .string_option(
            "user",
            "",
            "<username>",
            "User",
            "",
            OptionFlags::PREFERENCE | OptionFlags::REQUIRED,
        )
        .unwrap();
    parser.command("", "", |_| Ok(())).unwrap();
    parser
}

#[test]
fn test_save_then_reuse_preferences() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf").join("options.json");

    let mut out = Vec::new();
    let mut parser = parser_with_file(&dir);
    let outcome = shell::run(
        &mut parser,
        &args(&["prog", "-user", "alice", "-saveoptions"]),
        &mut out,
    )
    .unwrap();

    assert!(matches!(outcome.action, ParseAction::SavePreferences(_)));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("Options saved to"), "{printed}");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\n\t\"user\": \"alice\"\n}"
    );

    // A fresh parser picks the user up from the file.
    let mut out = Vec::new();
    let mut parser = parser_with_file(&dir);
    let outcome = shell::run(&mut parser, &args(&["prog"]), &mut out).unwrap();
    assert_eq!(outcome.command(), Some(""));
    assert!(out.is_empty());
}

#[test]
fn test_show_options_prints_json() {
    let dir = TempDir::new().unwrap();
    let mut parser = parser_with_file(&dir);

    let mut out = Vec::new();
    shell::run(
        &mut parser,
        &args(&["prog", "-user", "bob", "-showoptions"]),
        &mut out,
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n\t\"user\": \"bob\"\n}\n"
    );
    assert!(!dir.path().join("conf").exists());
}

#[test]
fn test_missing_required_without_file() {
    let dir = TempDir::new().unwrap();
    let mut parser = parser_with_file(&dir);

    let mut out = Vec::new();
    let err = shell::run(&mut parser, &args(&["prog"]), &mut out).unwrap_err();
    assert!(matches!(err, CmdError::MissingRequiredOption(ref name) if name == "user"));
}

#[test]
fn test_version_is_printed() {
    let dir = TempDir::new().unwrap();
    let mut parser = parser_with_file(&dir);

    let mut out = Vec::new();
    shell::run(&mut parser, &args(&["prog", "-version"]), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "shell-test 1.0\n");
}

#[test]
fn test_corrupt_options_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let conf = dir.path().join("conf");
    std::fs::create_dir_all(&conf).unwrap();
    std::fs::write(conf.join("options.json"), "not json").unwrap();

    let mut parser = parser_with_file(&dir);
    let mut out = Vec::new();
    let err = shell::run(&mut parser, &args(&["prog", "-user", "x"]), &mut out).unwrap_err();
    assert!(matches!(err, CmdError::Preferences(_)));
}
