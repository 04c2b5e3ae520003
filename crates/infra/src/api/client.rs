//! REST client for the ticketboard backend
//!
//! Wraps [`HttpClient`] with the configured base URL, JSON helpers and
//! status mapping. Every non-2xx response becomes an [`ApiError`] carrying
//! the backend's `error`/`message` text when the body is JSON.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use ticketboard_domain::constants::DEFAULT_API_BASE_URL;
use ticketboard_domain::ApiConfig;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Timeout for a single attempt
    pub timeout: Duration,
    /// Total attempts for replayable requests
    pub max_attempts: usize,
    pub base_backoff: Duration,
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        let base_url = config.base_url.trim().trim_end_matches('/');
        Self {
            base_url: if base_url.is_empty() { DEFAULT_API_BASE_URL.to_string() } else { base_url.to_string() },
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts,
            base_backoff: Duration::from_millis(config.base_backoff_ms),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// REST client shared by every adapter
#[derive(Clone)]
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .base_backoff(config.base_backoff);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client: Arc::new(http_client), config })
    }

    /// Client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(ApiClientConfig::from(config))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL of `path`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, |request| request, true).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.execute(Method::GET, path, |request| request.query(query), true).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "GET request successful");
        Ok(result)
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let response = self.execute(Method::POST, path, |request| request.json(body), true).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "POST request successful");
        Ok(result)
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let response = self.execute(Method::PUT, path, |request| request.json(body), true).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "PUT request successful");
        Ok(result)
    }

    /// Execute a DELETE request, ignoring any response body
    ///
    /// # Errors
    ///
    /// Returns error if request fails
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, |request| request, true).await?;
        info!(path = %path, "DELETE request successful");
        Ok(())
    }

    /// POST a multipart form; sent exactly once
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn post_multipart<R: DeserializeOwned>(&self, path: &str, form: Form) -> Result<R, ApiError> {
        let response = self.execute(Method::POST, path, |request| request.multipart(form), false).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "POST multipart request successful");
        Ok(result)
    }

    /// PUT a multipart form; sent exactly once
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    #[instrument(skip(self, form), fields(path = %path))]
    pub async fn put_multipart<R: DeserializeOwned>(&self, path: &str, form: Form) -> Result<R, ApiError> {
        let response = self.execute(Method::PUT, path, |request| request.multipart(form), false).await?;
        let result = Self::decode(response, path).await?;
        info!(path = %path, "PUT multipart request successful");
        Ok(result)
    }

    /// GET returning the raw response for streaming downloads
    ///
    /// # Errors
    ///
    /// Returns error if request fails or the status is not a success
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_stream<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Response, ApiError> {
        self.execute(Method::GET, path, |request| request.query(query), true).await
    }

    async fn execute<F>(&self, method: Method, path: &str, build: F, replayable: bool) -> Result<Response, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path);
        debug!(%method, url = %url, "API request");

        let request = build(self.http_client.request(method, &url));
        let sent = if replayable {
            self.http_client.send(request).await
        } else {
            self.http_client.send_once(request).await
        };
        let response = sent.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_status_error(status, &url, &body);
            warn!(status = status.as_u16(), url = %url, error = %err, "API request failed");
            return Err(err);
        }
        Ok(response)
    }

    /// Decode a JSON body; empty bodies (204/205 or zero-length 200)
    /// decode as JSON `null`.
    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let status = response.status();
        let text = if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read response from {path}: {e}")))?
        };

        let result = if text.trim().is_empty() {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_str(&text)
        };
        result.map_err(|e| ApiError::Decode(format!("{path}: {e}")))
    }
}

fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
    let detail = backend_message(body).unwrap_or_else(|| body.trim().to_string());
    let message = if detail.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {detail}")
    };

    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else if status.is_server_error() {
        ApiError::Server { status: status.as_u16(), message }
    } else if status.is_client_error() {
        ApiError::Client { status: status.as_u16(), message }
    } else {
        ApiError::Network(message)
    }
}

/// The backend reports failures as `{"error": "..."}` or `{"message": "..."}`.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::to_string)
}
