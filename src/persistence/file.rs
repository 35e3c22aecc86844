//! Reading and writing the preferences file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CmdError, Result};

/// Reads the preferences file.
///
/// A missing file means no preferences have been saved yet and returns
/// `Ok(None)`.
pub fn load_preferences(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes of preferences from {}", bytes.len(), path.display());
            Ok(Some(bytes))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No preferences file at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(CmdError::io(path, e)),
    }
}

/// Writes the preferences file, creating parent directories as needed.
///
/// Directories are created owner-only on Unix. An existing file is
/// truncated.
pub fn save_preferences(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_private_dir(parent).map_err(|e| CmdError::io(parent, e))?;
    }

    fs::write(path, bytes).map_err(|e| CmdError::io(path, e))?;
    info!("Saved preferences to {}", path.display());
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}
