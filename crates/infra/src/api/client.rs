//! REST client for the schedules backend
//!
//! Wraps [`HttpClient`] with a validated base URL, per-request credentials
//! and error normalization. Reads (`GET`) may be retried by the transport;
//! writes are sent exactly once.

use std::sync::Arc;
use std::time::Duration;

use agenda_domain::{ApiConfig, ErrorEnvelope};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{CredentialProvider, Credentials};
use super::errors::ApiError;
use crate::http::{HttpClient, RetryPolicy};

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:8080/api/v1")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Attempts for read requests (initial try + retries)
    pub read_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            read_attempts: config.read_attempts,
        }
    }
}

/// API client for the schedules backend
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be created.
    pub fn new(
        config: ApiClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.read_attempts)
            .user_agent(concat!("agenda/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Ok(Self { http, base_url, credentials })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path?query`, retried on transient failures
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<Q, T>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(Method::GET, path, RetryPolicy::Retry, |request| match query {
                Some(query) => request.query(query),
                None => request,
            })
            .await?;
        Self::decode(response).await
    }

    /// `POST path` with a JSON body, sent once
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response =
            self.send(Method::POST, path, RetryPolicy::Once, |request| request.json(body)).await?;
        Self::decode(response).await
    }

    /// `PUT path` with a JSON body, sent once
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response =
            self.send(Method::PUT, path, RetryPolicy::Once, |request| request.json(body)).await?;
        Self::decode(response).await
    }

    /// `PATCH path` without a body, sent once
    #[instrument(skip(self), fields(path = %path))]
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::PATCH, path, RetryPolicy::Once, |request| request).await?;
        Self::decode(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        policy: RetryPolicy,
        customize: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, url = %url, ?policy, "API request");

        let credentials = self.credentials.credentials().await?;
        let request = customize(credentials.apply(
            self.http.request(method, &url).header(reqwest::header::ACCEPT, "application/json"),
        ));

        // Attempts are bounded by the transport timeout; this caps the retry loop as a whole
        let deadline = self.http.deadline(policy);
        let response = match tokio::time::timeout(deadline, self.http.execute(request, policy)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                let err = ApiError::from(err);
                warn!(url = %url, category = ?err.category(), error = %err, "API request failed");
                return Err(err);
            }
            Err(_) => {
                warn!(url = %url, ?deadline, "API request exceeded its deadline");
                return Err(ApiError::Timeout(deadline));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(url = %url, %status, error = %err, "Failed to read error response body");
                String::new()
            }
        };
        let err = ApiError::from_status(status.as_u16(), error_message(status, &body));
        warn!(url = %url, %status, category = ?err.category(), "API returned an error");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        // 204 and 205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "No content response ({}), but a body was expected",
                    status.as_u16()
                ))
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the credential provider
    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the API client; without credentials requests are anonymous
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials =
            self.credentials.unwrap_or_else(|| Arc::new(Credentials::anonymous()));
        ApiClient::new(config, credentials)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!(
            "API base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Backend `error` field, else a generic status line
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::api::errors::ApiErrorCategory;

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct Echo {
        message: String,
    }

    fn client(server: &MockServer, credentials: Credentials) -> ApiClient {
        let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
        ApiClient::new(config, Arc::new(credentials)).unwrap()
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Authorization", "Bearer t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "pong"})))
            .expect(1)
            .mount(&server)
            .await;

        let result: Echo =
            client(&server, Credentials::bearer("t0k3n")).get::<(), _>("/ping", None).await.unwrap();

        assert_eq!(result.message, "pong");
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(|req: &Request| {
                let status = if req.headers.contains_key("authorization") { 500 } else { 200 };
                ResponseTemplate::new(status).set_body_json(json!({"message": "ok"}))
            })
            .mount(&server)
            .await;

        let result: Result<Echo, _> =
            client(&server, Credentials::anonymous()).get::<(), _>("/ping", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn sends_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("status", "sent"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let query = [("status", "sent"), ("page", "2")];
        let result: Result<Echo, _> =
            client(&server, Credentials::anonymous()).get("/items", Some(&query)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn uses_backend_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(body_json(json!({"message": "hi"})))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "Phone is invalid"})))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server, Credentials::anonymous())
            .post::<_, Echo>("/items", &Echo { message: "hi".into() })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Client { status: 422, message: "Phone is invalid".into() });
    }

    #[tokio::test]
    async fn falls_back_to_status_line_without_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(409).set_body_string("<html>conflict</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Credentials::anonymous()).patch::<Echo>("/x").await.unwrap_err();

        assert_eq!(err.message(), "Request failed with status code 409");
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn reads_retry_once_but_writes_do_not() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server, Credentials::anonymous());
        let read = api.get::<(), Echo>("/x", None).await.unwrap_err();
        let write = api.put::<_, Echo>("/x", &Echo { message: "m".into() }).await.unwrap_err();

        assert!(matches!(read, ApiError::Server { status: 503, .. }));
        assert!(matches!(write, ApiError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn read_retries_after_an_attempt_times_out() {
        let server = MockServer::start().await;
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = hits.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &Request| {
                let template = ResponseTemplate::new(200).set_body_json(json!({"message": "late"}));
                if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    template.set_delay(Duration::from_millis(800))
                } else {
                    template
                }
            })
            .mount(&server)
            .await;

        let config = ApiClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(300),
            read_attempts: 2,
        };
        let api = ApiClient::new(config, Arc::new(Credentials::anonymous())).unwrap();
        let result: Echo = api.get::<(), _>("/slow", None).await.unwrap();

        assert_eq!(result.message, "late");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn timed_out_write_is_not_repeated() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
            .expect(1)
            .mount(&server)
            .await;

        let config = ApiClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(300),
            read_attempts: 2,
        };
        let api = ApiClient::new(config, Arc::new(Credentials::anonymous())).unwrap();
        let err = api.patch::<Echo>("/x/cancel").await.unwrap_err();

        assert_eq!(err.category(), ApiErrorCategory::Network);
    }

    #[tokio::test]
    async fn unparseable_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server, Credentials::anonymous()).get::<(), Echo>("/x", None).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn base_url_must_be_absolute_http() {
        assert!(normalize_base_url("localhost:8080").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert_eq!(
            normalize_base_url("http://localhost:8080/api/v1/").unwrap(),
            "http://localhost:8080/api/v1"
        );
    }

    #[test]
    fn builder_defaults_to_anonymous() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn error_message_prefers_backend_text() {
        assert_eq!(error_message(StatusCode::BAD_REQUEST, r#"{"error":"Nope"}"#), "Nope");
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"  "}"#),
            "Request failed with status code 400"
        );
    }
}
