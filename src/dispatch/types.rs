//! Dispatch traits
//!
//! `Operation` describes how a typed request marshals onto the wire and what
//! it decodes into; `Transport` is the collaborator that carries it.

use crate::error::{Error, Result};
use crate::http::HttpRequest;
use crate::types::{JsonValue, Service};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// A single remote API operation
pub trait Operation: Send + Sync {
    /// Decoded response type
    type Output: DeserializeOwned + Send + 'static;

    /// Service the operation belongs to
    const SERVICE: Service;

    /// API operation name, e.g. `ListDirectories`
    const NAME: &'static str;

    /// Marshal the request, failing on missing required parameters
    fn to_http(&self) -> Result<HttpRequest>;
}

/// The remote call collaborator: auth, transport and retries live behind it
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the decoded JSON body
    async fn execute(&self, request: HttpRequest) -> Result<JsonValue>;

    /// The endpoint requests are sent to
    fn endpoint(&self) -> &str;
}

/// Return a required parameter, or a validation error naming it
pub fn require<'a, T>(value: &'a Option<T>, operation: &str, field: &str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| Error::missing_parameter(operation, field))
}

/// Like [`require`], but blank strings count as missing
pub fn require_str<'a>(value: &'a Option<String>, operation: &str, field: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Error::missing_parameter(operation, field)),
    }
}

/// Serialize a request body
pub fn to_body<T: serde::Serialize>(value: &T) -> Result<JsonValue> {
    Ok(serde_json::to_value(value)?)
}
