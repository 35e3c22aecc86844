//! Parser settings.
//!
//! Settings are normally built in code, but can also be loaded from a TOML
//! file so an application can keep its title and preferences location next to
//! the rest of its configuration.

use crate::error::{CmdError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings that shape parsing and the usage text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Printed at the top of the usage text. Setting it enables `-version`.
    #[serde(default)]
    pub title: Option<String>,

    /// Program name shown in usage. Defaults to the basename of argument 0.
    #[serde(default)]
    pub program_name: Option<String>,

    /// Where preference options are loaded from and saved to. Setting it
    /// enables the show and save flags.
    #[serde(default)]
    pub options_file: Option<PathBuf>,

    /// Flag that prints the saved preferences.
    #[serde(default = "default_show_flag")]
    pub show_options_flag: String,

    /// Flag that saves the current preferences.
    #[serde(default = "default_save_flag")]
    pub save_options_flag: String,
}

fn default_show_flag() -> String {
    "-showoptions".to_string()
}

fn default_save_flag() -> String {
    "-saveoptions".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: None,
            program_name: None,
            options_file: None,
            show_options_flag: default_show_flag(),
            save_options_flag: default_save_flag(),
        }
    }
}

impl Settings {
    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the program name used in usage.
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Sets the preferences file.
    pub fn with_options_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options_file = Some(path.into());
        self
    }

    /// Loads settings from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CmdError::io(path, e))?;

        Self::from_toml_str(&content).map_err(|e| {
            CmdError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CmdError::config(e.to_string()))
    }

    /// Resolves the program name, falling back to the basename of `argv0`.
    pub fn program_name_or(&self, argv0: Option<&str>) -> String {
        if let Some(name) = &self.program_name {
            return name.clone();
        }
        argv0
            .map(Path::new)
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
