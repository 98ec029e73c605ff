use std::time::Duration;

use agenda_domain::constants::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_READ_ATTEMPTS};
use agenda_domain::AgendaError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Whether a request may be repeated after a transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Up to the client's configured attempt count (reads)
    Retry,
    /// Exactly one attempt (mutations)
    Once,
}

/// HTTP client with built-in retry and timeout support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, AgendaError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Total attempts a retried request may take.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Longest `execute` may take under `policy`: every attempt timing out
    /// plus the backoff between them.
    pub fn deadline(&self, policy: RetryPolicy) -> Duration {
        let attempts = self.attempts(policy);
        let backoff: Duration = (1..attempts).map(|retry| self.backoff_delay(retry)).sum();
        let attempts = u32::try_from(attempts).unwrap_or(u32::MAX);
        self.timeout.saturating_mul(attempts).saturating_add(backoff)
    }

    fn attempts(&self, policy: RetryPolicy) -> usize {
        match policy {
            RetryPolicy::Retry => self.max_attempts.max(1),
            RetryPolicy::Once => 1,
        }
    }

    /// Execute with retries on connection failures and 5xx responses.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AgendaError> {
        self.execute(builder, RetryPolicy::Retry).await
    }

    /// Execute exactly once.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, AgendaError> {
        self.execute(builder, RetryPolicy::Once).await
    }

    /// Execute the provided request builder under `policy`.
    pub async fn execute(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, AgendaError> {
        let attempts = self.attempts(policy);
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    AgendaError::Internal("request body must be buffered to be sent".into())
                })?
                .build()
                .map_err(|err| AgendaError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            let can_retry = attempt < attempts;
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && can_retry => {
                    warn!(attempt, %method, %url, status = %response.status(), "retrying after server error");
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "received HTTP response");
                    return Ok(response);
                }
                Err(err) if can_retry && is_transient(&err) => {
                    warn!(attempt, %method, %url, error = %err, "retrying after transport failure");
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    return Err(InfraError::from(err).into());
                }
            }

            self.pause_before_retry(attempt).await;
            attempt += 1;
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn pause_before_retry(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_attempts: DEFAULT_READ_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts for retried requests
    /// (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, AgendaError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| AgendaError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            timeout: self.timeout,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    if err.is_timeout() || err.is_request() {
        return true;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if err.is_connect() {
            return true;
        }
    }
    false
}
