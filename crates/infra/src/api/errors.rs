//! API-specific error types
//!
//! Every variant carries the message a user should see; [`ApiError::message`]
//! returns it without the category prefix used by `Display`.

use std::time::Duration;

use agenda_domain::constants::FALLBACK_ERROR_MESSAGE;
use agenda_domain::AgendaError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401, 403
    Authentication,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// Other 4xx
    Client,
    /// Connection failures and timeouts
    Network,
    /// Local misconfiguration or unreadable responses
    Config,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {message}")]
    Auth { status: u16, message: String },

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {message}")]
    Server { status: u16, message: String },

    #[error("Client error: {message}")]
    Client { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx status with the already normalized `message`
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Auth { status, message },
            404 => Self::NotFound(message),
            429 => Self::RateLimit(message),
            500..=599 => Self::Server { status, message },
            _ => Self::Client { status, message },
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth { .. } => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server { .. } => ApiErrorCategory::Server,
            Self::Client { .. } | Self::NotFound(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Decode(_) => ApiErrorCategory::Config,
        }
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Server { status, .. } | Self::Client { status, .. } => {
                Some(*status)
            }
            Self::RateLimit(_) => Some(429),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// User-facing text; never empty
    pub fn message(&self) -> String {
        let raw = match self {
            Self::Auth { message, .. }
            | Self::Server { message, .. }
            | Self::Client { message, .. }
            | Self::RateLimit(message)
            | Self::NotFound(message)
            | Self::Network(message) => message.clone(),
            other => other.to_string(),
        };
        if raw.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            raw
        }
    }
}

impl From<AgendaError> for ApiError {
    fn from(err: AgendaError) -> Self {
        match err {
            AgendaError::Api { status, message } => Self::from_status(status, message),
            AgendaError::Network(message) => Self::Network(message),
            AgendaError::NotFound(message) => Self::NotFound(message),
            AgendaError::Config(message) => Self::Config(message),
            AgendaError::InvalidInput(message) | AgendaError::Internal(message) => {
                Self::Decode(message)
            }
        }
    }
}

impl From<ApiError> for AgendaError {
    fn from(err: ApiError) -> Self {
        let message = err.message();
        match err {
            ApiError::Auth { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Client { status, .. } => AgendaError::Api { status, message },
            ApiError::RateLimit(_) => AgendaError::Api { status: 429, message },
            ApiError::NotFound(_) => AgendaError::NotFound(message),
            ApiError::Network(_) | ApiError::Timeout(_) => AgendaError::Network(message),
            ApiError::Config(_) => AgendaError::Config(message),
            ApiError::Decode(_) => AgendaError::Internal(message),
        }
    }
}
