//! Integration tests for parsing, dispatch and preferences.

pub mod parse_test;
pub mod shell_test;

/// Builds an argument vector from string literals.
pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}
