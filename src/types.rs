//! Common types used throughout aws-opkit
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Backoff
// ============================================================================

/// Backoff strategy between transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Same delay every attempt
    Constant,
    /// Delay grows linearly with the attempt number
    Linear,
    /// Delay doubles every attempt
    #[default]
    Exponential,
}

// ============================================================================
// Services
// ============================================================================

/// The AWS services this crate wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Amazon Cloud Directory
    CloudDirectory,
    /// AWS User Notifications
    Notifications,
}

impl Service {
    /// All wrapped services
    pub const ALL: [Service; 2] = [Service::CloudDirectory, Service::Notifications];

    /// Identifier used in config files, environment variables and the CLI
    pub fn id(self) -> &'static str {
        match self {
            Service::CloudDirectory => "clouddirectory",
            Service::Notifications => "notifications",
        }
    }

    /// Human-readable service name
    pub fn title(self) -> &'static str {
        match self {
            Service::CloudDirectory => "Amazon Cloud Directory",
            Service::Notifications => "AWS User Notifications",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Service {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clouddirectory" | "cloud-directory" | "cdir" => Ok(Service::CloudDirectory),
            "notifications" | "user-notifications" | "uno" => Ok(Service::Notifications),
            other => Err(crate::Error::config(format!("Unknown service: {other}"))),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for output messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::DELETE), reqwest::Method::DELETE);
        assert_eq!(Method::PUT.to_string(), "PUT");
    }

    #[test]
    fn test_service_parse() {
        assert_eq!("clouddirectory".parse::<Service>().unwrap(), Service::CloudDirectory);
        assert_eq!("CDIR".parse::<Service>().unwrap(), Service::CloudDirectory);
        assert_eq!("notifications".parse::<Service>().unwrap(), Service::Notifications);
        assert!("s3".parse::<Service>().is_err());
    }

    #[test]
    fn test_backoff_serde() {
        let b: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(b, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }
}
