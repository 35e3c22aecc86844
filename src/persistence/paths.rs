//! User home folder lookup through environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

/// Read access to environment variables.
pub trait EnvLookup {
    /// Returns the value of `name`, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Returns the user's home folder, or `None` if the environment has none.
///
/// Unix reads `HOME`. Windows joins `HOMEDRIVE` and `HOMEPATH`, falling back
/// to `USERPROFILE` when either is empty.
pub fn user_home_folder(env: &dyn EnvLookup) -> Option<PathBuf> {
    let home = if cfg!(windows) {
        windows_home(env)
    } else {
        unix_home(env)
    };
    home.filter(|h| !h.is_empty()).map(PathBuf::from)
}

fn unix_home(env: &dyn EnvLookup) -> Option<String> {
    env.var("HOME")
}

fn windows_home(env: &dyn EnvLookup) -> Option<String> {
    let drive = env.var("HOMEDRIVE").unwrap_or_default();
    let path = env.var("HOMEPATH").unwrap_or_default();
    if drive.is_empty() || path.is_empty() {
        env.var("USERPROFILE")
    } else {
        Some(drive + &path)
    }
}
