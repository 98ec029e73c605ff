//! Configuration structures
//!
//! Every section has serde defaults so a partial file (or none at all) still
//! yields a working configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DASHBOARD_RECENT_LIMIT, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS,
    DEFAULT_CACHE_MAX_CAPACITY, DEFAULT_CACHE_STALE_SECS, DEFAULT_PAGE_SIZE, DEFAULT_READ_ATTEMPTS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts for read requests; mutations always go out once
    #[serde(default = "default_read_attempts")]
    pub read_attempts: usize,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            read_attempts: default_read_attempts(),
        }
    }
}

/// Credential source
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Query cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { stale_after_secs: default_stale_after_secs(), max_capacity: default_max_capacity() }
    }
}

/// Page sizes used by the list and dashboard views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_dashboard_recent")]
    pub dashboard_recent: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { page_size: default_page_size(), dashboard_recent: default_dashboard_recent() }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

fn default_read_attempts() -> usize {
    DEFAULT_READ_ATTEMPTS
}

fn default_stale_after_secs() -> u64 {
    DEFAULT_CACHE_STALE_SECS
}

fn default_max_capacity() -> u64 {
    DEFAULT_CACHE_MAX_CAPACITY
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_dashboard_recent() -> u32 {
    DASHBOARD_RECENT_LIMIT
}
