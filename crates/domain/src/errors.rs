//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Agenda
///
/// Display renders only the user-facing message for `Api` and `Network` so a
/// backend's `error` string reaches the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum AgendaError {
    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Request never produced a response (DNS, connect, timeout)
    #[error("{0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgendaError {
    /// Human-readable message suitable for notifications and error views
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Network(message) | Self::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status when the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable label for structured logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Agenda operations
pub type Result<T> = std::result::Result<T, AgendaError>;
