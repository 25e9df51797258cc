//! Unified path management for svcdesk files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/svcdesk/           # Config directory (durable)
//! └── config.toml              # Client configuration
//!
//! $XDG_RUNTIME_DIR/svcdesk/    # Runtime directory (tmpfs, per OS session)
//! └── session.json             # Current session, never written to the config dir
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "svcdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
    /// The platform has no per-session runtime directory.
    RuntimeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
            PathError::RuntimeDirNotFound => write!(f, "Cannot find runtime directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for svcdesk.
pub struct DeskPaths;

impl DeskPaths {
    /// Returns the svcdesk configuration directory (e.g. `~/.config/svcdesk/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the per-session runtime directory (e.g. `/run/user/1000/svcdesk/`).
    pub fn runtime_dir() -> Result<PathBuf, PathError> {
        dirs::runtime_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::RuntimeDirNotFound)
    }

    /// Returns the path of the session file inside the runtime directory.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::runtime_dir()?.join("session.json"))
    }
}
