//! Command registration, argument classification, routing and usage.
//!
//! Parsing itself lives in [`crate::parser`]; this module holds the pieces it
//! is assembled from, each testable on its own.

pub mod definitions;
pub mod help;
pub mod output;
pub mod router;
pub mod tokenizer;

pub use definitions::{CommandContext, CommandDef, CommandHandler, CommandRegistry};
pub use output::{ParseAction, ParseOutcome};
pub use router::Route;
pub use tokenizer::Token;
