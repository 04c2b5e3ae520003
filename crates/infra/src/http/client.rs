use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use ticketboard_domain::constants::{
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use ticketboard_domain::TicketboardError;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
///
/// Retries use exponential backoff (`base * 2^(n-1)`, capped at
/// `max_backoff`). Transport failures are retried for idempotent methods;
/// POST is only retried when the connection was never established. 5xx
/// responses are retried for idempotent methods only and 4xx never.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
    max_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, TicketboardError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying per the policy above.
    ///
    /// # Errors
    /// `Internal` when the body cannot be replayed (use [`Self::send_once`]),
    /// otherwise the converted transport error of the last attempt. Error
    /// statuses are returned as responses, not errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TicketboardError> {
        let mut attempt = 1;
        loop {
            let replay = builder.try_clone().ok_or_else(|| {
                TicketboardError::Internal(
                    "request body cannot be replayed; use send_once for multipart bodies".into(),
                )
            })?;
            let request = replay.build().map_err(transport_error)?;
            let method = request.method().clone();
            let url = request.url().clone();
            let may_retry = attempt < self.max_attempts;
            debug!(attempt, %method, %url, "Sending request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "Response received");
                    if !(may_retry && status.is_server_error() && is_idempotent(&method)) {
                        return Ok(response);
                    }
                    warn!(attempt, %method, %url, %status, "Server error; retrying");
                }
                Err(err) => {
                    if !(may_retry && should_retry_error(&method, &err)) {
                        debug!(attempt, %method, %url, error = %err, "Request failed");
                        return Err(transport_error(err));
                    }
                    warn!(attempt, %method, %url, error = %err, "Transport failure; retrying");
                }
            }

            self.sleep_with_backoff(attempt).await;
            attempt += 1;
        }
    }

    /// Send `builder` exactly once. Used for multipart uploads, which cannot
    /// be replayed.
    ///
    /// # Errors
    /// The converted transport error when no response arrives.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, TicketboardError> {
        let request = builder.build().map_err(transport_error)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request (no retry)");

        let response = self.client.execute(request).await.map_err(transport_error)?;
        debug!(%method, %url, status = %response.status(), "Response received");
        Ok(response)
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = u32::try_from(retry_number.saturating_sub(1).min(16)).unwrap_or(16);
        let multiplier = 1u32 << shift;
        self.base_backoff.saturating_mul(multiplier).min(self.max_backoff)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
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
    max_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
            max_backoff: Duration::from_secs(5),
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

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Upper bound for a single retry delay.
    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
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

    /// # Errors
    /// `Config` when reqwest rejects the settings (e.g. a bad header).
    pub fn build(self) -> Result<HttpClient, TicketboardError> {
        let mut reqwest_builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            reqwest_builder = reqwest_builder.user_agent(agent);
        }
        if let Some(headers) = self.default_headers {
            reqwest_builder = reqwest_builder.default_headers(headers);
        }

        Ok(HttpClient {
            client: reqwest_builder.build().map_err(transport_error)?,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
            max_backoff: self.max_backoff,
        })
    }
}

fn transport_error(err: reqwest::Error) -> TicketboardError {
    InfraError::from(err).into()
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS)
}

fn should_retry_error(method: &Method, err: &reqwest::Error) -> bool {
    if err.is_connect() {
        return true;
    }
    is_idempotent(method) && (err.is_timeout() || err.is_request())
}
