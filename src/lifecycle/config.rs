//! # Configuration
//!
//! Where the remote store lives, and whether to use it at all.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CATALOG_API_URL` | `http://localhost:3001` | Base URL of the collection store |
//! | `CATALOG_OFFLINE` | unset | `1` or `true` runs against the seeded in-memory store |

use std::env;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const BASE_URL_VAR: &str = "CATALOG_API_URL";
pub const OFFLINE_VAR: &str = "CATALOG_OFFLINE";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub base_url: String,
    pub offline: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            offline: false,
        }
    }
}

impl SyncConfig {
    /// A config pointing at `base_url`, which must be an absolute http(s) URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason,
        };
        let parsed = Url::parse(&base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        Ok(Self {
            base_url,
            offline: false,
        })
    }

    /// Reads `CATALOG_API_URL` and `CATALOG_OFFLINE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var(BASE_URL_VAR).ok(), env::var(OFFLINE_VAR).ok())
    }

    fn from_vars(base_url: Option<String>, offline: Option<String>) -> Result<Self, ConfigError> {
        let mut config = match base_url {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim())?,
            _ => Self::default(),
        };
        config.offline = offline.as_deref().is_some_and(is_truthy);
        Ok(config)
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}
