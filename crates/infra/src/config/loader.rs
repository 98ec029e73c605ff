//! Configuration loader
//!
//! Loads application configuration from an optional file and overlays
//! environment variables on top of it.
//!
//! ## Loading Strategy
//! 1. Read the explicit path if one is given (it must exist)
//! 2. Otherwise probe the working directory for a config file
//! 3. Fall back to built-in defaults when no file is found
//! 4. Apply environment overrides
//! 5. Validate the result
//!
//! ## Environment Variables
//! - `AGENDA_API_BASE_URL`: Backend base URL
//! - `AGENDA_API_TOKEN`: Bearer token (empty clears a file token)
//! - `AGENDA_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `AGENDA_CACHE_STALE_SECS`: Seconds before cached queries are refetched
//!
//! ## File Locations
//! Probed in order in the current working directory:
//! `agenda.toml`, `agenda.json`, `config.toml`, `config.json`.

use std::path::{Path, PathBuf};

use agenda_domain::{AgendaError, Config, Result};
use url::Url;

pub const ENV_API_BASE_URL: &str = "AGENDA_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "AGENDA_API_TOKEN";
pub const ENV_API_TIMEOUT_SECS: &str = "AGENDA_API_TIMEOUT_SECS";
pub const ENV_CACHE_STALE_SECS: &str = "AGENDA_CACHE_STALE_SECS";

const CONFIG_FILE_NAMES: [&str; 4] = ["agenda.toml", "agenda.json", "config.toml", "config.json"];

/// Load configuration from file (explicit or probed) plus environment
///
/// # Errors
/// Returns `AgendaError::Config` if:
/// - The explicit file does not exist or cannot be parsed
/// - An environment override has an invalid value
/// - The resulting configuration is invalid
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// Supports JSON and TOML formats (detected by file extension). Missing
/// sections and fields take their defaults.
///
/// # Errors
/// Returns `AgendaError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(AgendaError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AgendaError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AgendaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AgendaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AgendaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the current working directory
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_in(&cwd)
}

fn probe_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Overlay `AGENDA_*` environment variables on `config`
///
/// # Errors
/// Returns `AgendaError::Config` if a numeric variable does not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(base_url) = env_var(ENV_API_BASE_URL) {
        config.api.base_url = base_url;
    }
    if let Ok(token) = std::env::var(ENV_API_TOKEN) {
        config.auth.token = (!token.trim().is_empty()).then_some(token);
    }
    if let Some(timeout) = env_u64(ENV_API_TIMEOUT_SECS)? {
        config.api.timeout_secs = timeout;
    }
    if let Some(stale) = env_u64(ENV_CACHE_STALE_SECS)? {
        config.cache.stale_after_secs = stale;
    }
    Ok(())
}

/// Reject configurations the client cannot run with
///
/// # Errors
/// Returns `AgendaError::Config` describing the first problem found.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url).map_err(|e| {
        AgendaError::Config(format!("Invalid API base URL '{}': {}", config.api.base_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AgendaError::Config(format!(
            "API base URL must use http or https: {}",
            config.api.base_url
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(AgendaError::Config("API timeout must be at least one second".into()));
    }
    if config.api.read_attempts == 0 {
        return Err(AgendaError::Config("Read attempts must be at least 1".into()));
    }
    if config.ui.page_size == 0 {
        return Err(AgendaError::Config("Page size must be at least 1".into()));
    }
    Ok(())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| AgendaError::Config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}
