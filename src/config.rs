//! Client configuration
//!
//! Endpoints and HTTP settings, loaded from a YAML or JSON file and then
//! overridden from the environment and the command line.
//!
//! ```yaml
//! endpoints:
//!   clouddirectory: https://clouddirectory.us-west-2.amazonaws.com
//!   notifications: https://notifications.us-east-1.api.aws
//! http:
//!   timeout_ms: 30000
//!   max_retries: 3
//!   backoff:
//!     type: exponential
//!     initial_ms: 100
//!     max_ms: 20000
//!   rate_limit:
//!     requests_per_second: 5
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, Service};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Overrides the Cloud Directory endpoint
pub const CLOUDDIRECTORY_ENDPOINT_VAR: &str = "OPKIT_CLOUDDIRECTORY_ENDPOINT";

/// Overrides the User Notifications endpoint
pub const NOTIFICATIONS_ENDPOINT_VAR: &str = "OPKIT_NOTIFICATIONS_ENDPOINT";

/// Fallback endpoint for services that have none configured
pub const AWS_ENDPOINT_VAR: &str = "AWS_ENDPOINT_URL";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// HTTP settings shared by all services
    #[serde(default)]
    pub http: HttpConfig,
}

/// Endpoint URL per service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clouddirectory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<String>,
}

impl EndpointsConfig {
    fn slot(&mut self, service: Service) -> &mut Option<String> {
        match service {
            Service::CloudDirectory => &mut self.clouddirectory,
            Service::Notifications => &mut self.notifications,
        }
    }

    fn get(&self, service: Service) -> Option<&str> {
        match service {
            Service::CloudDirectory => self.clouddirectory.as_deref(),
            Service::Notifications => self.notifications.as_deref(),
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Client-side rate limit; off when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff: BackoffConfig::default(),
            rate_limit: None,
            headers: HashMap::new(),
            user_agent: None,
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    20_000
}

// ============================================================================
// Loading
// ============================================================================

impl ClientConfig {
    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply endpoint overrides from a variable lookup
    ///
    /// Service-specific variables replace the file value. `AWS_ENDPOINT_URL`
    /// only fills services that still have no endpoint.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        for service in Service::ALL {
            if let Some(endpoint) = lookup(endpoint_var(service)) {
                *self.endpoints.slot(service) = Some(endpoint);
            }
        }

        if let Some(fallback) = lookup(AWS_ENDPOINT_VAR) {
            for service in Service::ALL {
                let slot = self.endpoints.slot(service);
                if slot.is_none() {
                    *slot = Some(fallback.clone());
                }
            }
        }
        self
    }

    /// Set the endpoint for one service
    #[must_use]
    pub fn with_endpoint(mut self, service: Service, endpoint: impl Into<String>) -> Self {
        *self.endpoints.slot(service) = Some(endpoint.into());
        self
    }

    /// Check every configured endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        for service in Service::ALL {
            if let Some(endpoint) = self.endpoints.get(service) {
                validate_endpoint(service, endpoint)?;
            }
        }
        if self.http.timeout_ms == 0 {
            return Err(Error::invalid_config("http.timeout_ms", "must be greater than 0"));
        }
        if let Some(limit) = &self.http.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "http.rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Configured endpoint of a service
    pub fn endpoint(&self, service: Service) -> Option<&str> {
        self.endpoints.get(service)
    }

    /// Configured endpoint of a service, or an error naming the missing key
    pub fn endpoint_for(&self, service: Service) -> Result<&str> {
        self.endpoint(service)
            .ok_or_else(|| Error::missing_field(format!("endpoints.{}", service.id())))
    }

    /// HTTP client settings for one service
    pub fn http_client_config(&self, service: Service) -> Result<HttpClientConfig> {
        let endpoint = self.endpoint_for(service)?;
        validate_endpoint(service, endpoint)?;

        let http = &self.http;
        let mut builder = HttpClientConfig::builder()
            .base_url(endpoint)
            .timeout(Duration::from_millis(http.timeout_ms))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff.backoff_type,
                Duration::from_millis(http.backoff.initial_ms),
                Duration::from_millis(http.backoff.max_ms),
            );
        if let Some(limit) = &http.rate_limit {
            builder = builder.rate_limit(limit.clone());
        }
        if let Some(agent) = &http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &http.headers {
            builder = builder.header(key, value);
        }
        Ok(builder.build())
    }
}

/// Environment variable that overrides a service's endpoint
pub fn endpoint_var(service: Service) -> &'static str {
    match service {
        Service::CloudDirectory => CLOUDDIRECTORY_ENDPOINT_VAR,
        Service::Notifications => NOTIFICATIONS_ENDPOINT_VAR,
    }
}

fn validate_endpoint(service: Service, endpoint: &str) -> Result<()> {
    let field = format!("endpoints.{}", service.id());
    let url = Url::parse(endpoint).map_err(|e| Error::invalid_config(&field, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::invalid_config(
            field,
            format!("'{endpoint}' is not an http(s) URL"),
        ));
    }
    Ok(())
}
