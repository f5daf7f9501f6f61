//! Error types for aws-opkit
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Boxed error used for opaque transport causes
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for aws-opkit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Service Errors
    // ============================================================================
    #[error("{operation} failed ({code}, HTTP {status}): {message}")]
    RemoteService {
        operation: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error(
        "Name resolution failure attempting to reach service endpoint '{endpoint}'. \
         Check the configured endpoint and network connectivity"
    )]
    EndpointResolution {
        endpoint: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to decode {operation} response: {message}")]
    Decode { operation: String, message: String },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("{operation}: missing required parameter '{field}'")]
    ParameterValidation { operation: String, field: String },

    #[error("Invalid input for {operation}: {message}")]
    InvalidInput { operation: String, message: String },

    #[error("Unknown operation '{operation}' for service '{service}'")]
    UnknownOperation { service: String, operation: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a transport error wrapping an underlying cause
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a service error
    pub fn remote_service(
        operation: impl Into<String>,
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RemoteService {
            operation: operation.into(),
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(operation: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ParameterValidation {
            operation: operation.into(),
            field: field.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Check if this error was raised by the remote service or the path to it
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::Transport { .. }
                | Error::Timeout { .. }
                | Error::RemoteService { .. }
                | Error::EndpointResolution { .. }
        )
    }

    /// Short machine-readable category, used in CLI error output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EndpointResolution { .. } => "EndpointResolutionError",
            Error::ParameterValidation { .. } | Error::InvalidInput { .. } => {
                "ParameterValidationError"
            }
            e if e.is_remote() => "RemoteServiceError",
            _ => "Error",
        }
    }
}

/// Result type alias for aws-opkit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
