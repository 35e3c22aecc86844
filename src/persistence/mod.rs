//! Persistence of preference options.
//!
//! The codec turns the registry into a JSON document and back; the file
//! helpers move that document to and from disk. Parsing only ever sees bytes.

pub mod file;
pub mod paths;
pub mod preferences;

pub use file::{load_preferences, save_preferences};
pub use paths::{user_home_folder, EnvLookup, ProcessEnv};
pub use preferences::{deserialize, serialize};
