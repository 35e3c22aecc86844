//! Runs the demo binary with a temporary home folder.

#![cfg(unix)]

use std::process::{Command, Output};

use base64::Engine;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn demo(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdparser-demo"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run demo binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_visible_options() {
    let home = TempDir::new().unwrap();
    let output = demo(&home, &["-h"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("cmdparser-demo "), "{text}");
    assert!(text.contains("\nUsage:\n"), "{text}");
    assert!(text.contains("-user=<username>"), "{text}");
    assert!(text.contains("cmdparser-demo [options] copy <src> <dst>\n"), "{text}");
    assert!(text.contains("copy options:\n  -ignore=<pattern>"), "{text}");
    assert!(!text.contains("accesskey"), "{text}");
}

#[test]
fn test_missing_user_fails() {
    let home = TempDir::new().unwrap();
    let output = demo(&home, &[]);

    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("Missing required option -user"), "{err}");
}

#[test]
fn test_saved_login_is_reused() {
    let home = TempDir::new().unwrap();

    let output = demo(&home, &["-user", "alice", "-password", "pw", "-saveoptions"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Options saved to"));

    let saved = std::fs::read_to_string(home.path().join(".cmdparser-demo/options.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&saved).unwrap();
    let key = base64::engine::general_purpose::STANDARD.encode("alice:pw");
    assert_eq!(doc, serde_json::json!({ "accesskey": key, "user": "alice" }));

    let output = demo(&home, &["copy", "-ignore", "*.tmp", "a", "b"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Would copy a to b\nIgnoring: *.tmp\n"
    );
}

#[test]
fn test_save_refused_without_user() {
    let home = TempDir::new().unwrap();
    let output = demo(&home, &["-password", "pw", "-saveoptions"]);

    assert!(!output.status.success());
    assert!(!home.path().join(".cmdparser-demo").exists());
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    let output = demo(&home, &["-version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("cmdparser-demo "));
}
