//! HTTP transport with retry and rate limiting
//!
//! Provides the client every service dispatcher sends through. It handles:
//! - Automatic retries with configurable backoff
//! - Rate limiting to prevent API throttling
//! - JSON body encoding and decoding
//! - Error classification for retry decisions

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::request::HttpRequest;
use crate::dispatch::Transport;
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the AWS error code on REST-JSON error responses
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Service endpoint all request paths are joined onto
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(20),
            backoff_type: BackoffType::Exponential,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("aws-opkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the endpoint URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: Url,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_config(
                "endpoint",
                format!("'{}' cannot be used as a base URL", config.base_url),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            base_url,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send a request, retrying transient failures, and decode the JSON body
    ///
    /// Throttling (429) waits for `retry-after`; 5xx, timeouts and connection
    /// failures back off. Anything else is returned on the first attempt.
    pub async fn send(&self, request: &HttpRequest) -> Result<JsonValue> {
        let url = self.build_url(request)?;
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            let failure = match self.attempt(request, &url).await {
                Ok(body) => {
                    debug!(
                        method = %request.method,
                        path = %request.path(),
                        attempt,
                        "request succeeded"
                    );
                    return Ok(body);
                }
                Err(failure) => failure,
            };

            let delay = match failure.retry {
                _ if attempt >= self.config.max_retries => None,
                Retry::Never => None,
                Retry::Backoff => Some(self.calculate_backoff(attempt)),
                Retry::After(wait) => Some(wait),
            };
            let Some(delay) = delay else {
                return Err(failure.error);
            };

            attempt += 1;
            warn!(
                method = %request.method,
                path = %request.path(),
                attempt,
                max_retries = self.config.max_retries,
                ?delay,
                error = %failure.error,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One round trip
    async fn attempt(
        &self,
        request: &HttpRequest,
        url: &Url,
    ) -> std::result::Result<JsonValue, Failure> {
        let mut req = self
            .client
            .request(request.method.into(), url.clone())
            .timeout(self.config.timeout);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                let timeout_ms = self.config.timeout.as_millis() as u64;
                return Err(Failure::backoff(Error::Timeout { timeout_ms }));
            }
            Err(e) if e.is_connect() => return Err(Failure::backoff(Error::Http(e))),
            Err(e) => return Err(Failure::never(Error::Http(e))),
        };

        let status = response.status();
        if status.is_success() {
            return decode_body(response).await.map_err(Failure::never);
        }

        let retry = if status == StatusCode::TOO_MANY_REQUESTS {
            Retry::After(retry_after(&response))
        } else if is_retryable_status(status) {
            Retry::Backoff
        } else {
            Retry::Never
        };
        Err(Failure {
            error: status_error(response).await,
            retry,
        })
    }

    /// Join the request path and query onto the endpoint
    pub fn build_url(&self, request: &HttpRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::invalid_config("endpoint", "cannot be a base URL"))?;
            segments.pop_if_empty();
            for segment in &request.segments {
                segments.push(segment);
            }
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<JsonValue> {
        self.send(&request).await
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("max_retries", &self.config.max_retries)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a success body; empty bodies become an empty object
async fn decode_body(response: Response) -> Result<JsonValue> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(JsonValue::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_str(&text)?)
}

/// Build an HttpStatus error, folding the error-type header into the body
async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let error_type = response
        .headers()
        .get(ERROR_TYPE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = response.text().await.unwrap_or_default();

    let body = match error_type {
        Some(code) => match serde_json::from_str::<JsonValue>(&body) {
            Ok(JsonValue::Object(mut map)) => {
                map.entry("__type").or_insert(JsonValue::String(code));
                JsonValue::Object(map).to_string()
            }
            _ => serde_json::json!({ "__type": code, "message": body }).to_string(),
        },
        None => body,
    };

    Error::http_status(status, body)
}

/// Check if an HTTP status is retryable
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 500 | 502 | 503 | 504)
}

/// Seconds from the `retry-after` header, one second when absent
fn retry_after(response: &Response) -> Duration {
    let seconds = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1);
    Duration::from_secs(seconds)
}

/// When a failed attempt may be repeated
enum Retry {
    Never,
    Backoff,
    After(Duration),
}

/// A failed attempt
struct Failure {
    error: Error,
    retry: Retry,
}

impl Failure {
    fn never(error: Error) -> Self {
        Self {
            error,
            retry: Retry::Never,
        }
    }

    fn backoff(error: Error) -> Self {
        Self {
            error,
            retry: Retry::Backoff,
        }
    }
}
