//! Request credentials
//!
//! The client never reads tokens from ambient state; a [`CredentialProvider`]
//! is handed to it at construction. [`Credentials`] is the static provider
//! built from configuration.

use std::fmt;

use async_trait::async_trait;
use reqwest::RequestBuilder;

use super::errors::ApiError;

/// Bearer token to attach to requests, if any
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// Credentials carrying `token`; blank tokens count as none
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self { token: (!token.trim().is_empty()).then_some(token) }
    }

    /// No `Authorization` header
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_token(token: Option<String>) -> Self {
        token.map_or_else(Self::anonymous, Self::bearer)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Add the `Authorization` header when a token is present
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() { "<redacted>" } else { "<none>" };
        f.debug_struct("Credentials").field("token", &token).finish()
    }
}

/// Trait for providing credentials per request
///
/// Allows a token to change between requests (e.g. after a re-login)
/// without rebuilding the client.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self) -> Result<Credentials, ApiError>;
}

#[async_trait]
impl CredentialProvider for Credentials {
    async fn credentials(&self) -> Result<Credentials, ApiError> {
        Ok(self.clone())
    }
}
