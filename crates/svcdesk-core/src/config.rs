use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_LOG_FILTER: &str = "svcdesk=info";

/// Where the current session is kept between calls.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStorageKind {
    /// Per-user runtime directory: survives between invocations, gone when
    /// the OS session ends.
    #[default]
    Runtime,
    /// Process memory only.
    Memory,
}

impl std::str::FromStr for SessionStorageKind {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "runtime" => Ok(Self::Runtime),
            "memory" => Ok(Self::Memory),
            other => Err(DeskError::config(format!(
                "Unknown session storage '{}', expected 'runtime' or 'memory'",
                other
            ))),
        }
    }
}

/// Client configuration (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to.
    pub api_base_url: String,
    /// Per-call timeout handed to the HTTP client. `None` keeps the
    /// client's own behaviour.
    pub request_timeout_secs: Option<u64>,
    pub session_storage: SessionStorageKind,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            session_storage: SessionStorageKind::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DeskError::config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(DeskError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
