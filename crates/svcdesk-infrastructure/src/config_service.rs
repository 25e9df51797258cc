//! Client configuration loading.
//!
//! Precedence, lowest to highest: built-in defaults, `config.toml`,
//! environment variables.

use crate::paths::DeskPaths;
use std::path::{Path, PathBuf};
use svcdesk_core::config::ClientConfig;
use svcdesk_core::error::{DeskError, Result};

pub const ENV_API_URL: &str = "SVCDESK_API_URL";
/// Legacy variable name, read when `SVCDESK_API_URL` is unset.
pub const ENV_API_URL_FALLBACK: &str = "API_URL";
pub const ENV_TIMEOUT_SECS: &str = "SVCDESK_TIMEOUT_SECS";
pub const ENV_SESSION_STORAGE: &str = "SVCDESK_SESSION_STORAGE";

/// Loads [`ClientConfig`] from file and environment.
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Self {
        Self {
            path: DeskPaths::config_file().ok(),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads the configuration using the process environment.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads the configuration with `env` as the variable source.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load_file()?;

        if let Some(url) = env(ENV_API_URL).or_else(|| env(ENV_API_URL_FALLBACK)) {
            config.api_base_url = url;
        }
        if let Some(timeout) = env(ENV_TIMEOUT_SECS) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                DeskError::config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
            config.request_timeout_secs = Some(secs);
        }
        if let Some(storage) = env(ENV_SESSION_STORAGE) {
            config.session_storage = storage.parse()?;
        }

        config.validate()?;
        tracing::debug!(
            "[ConfigService] Loaded config: api_base_url={}, session_storage={:?}",
            config.api_base_url,
            config.session_storage
        );
        Ok(config)
    }

    fn load_file(&self) -> Result<ClientConfig> {
        let Some(path) = &self.path else {
            return Ok(ClientConfig::default());
        };
        if !path.exists() {
            tracing::debug!("[ConfigService] No config file at {:?}, using defaults", path);
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
