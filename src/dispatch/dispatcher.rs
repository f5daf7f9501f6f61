//! Generic request/response dispatcher

use super::types::{Operation, Transport};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::sync::Arc;
use tracing::debug;

/// Substrings that identify a host name lookup failure in an error chain.
/// hyper reports `dns error`, the system resolver supplies the rest.
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "temporary failure in name resolution",
];

/// Sends typed operations through a shared transport
///
/// Holds no per-call state, so one dispatcher can serve any number of
/// sequential calls and clones share the same transport.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Create a dispatcher over a transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// The endpoint the transport sends to
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Marshal, send and decode one operation
    pub async fn send<O: Operation>(&self, request: &O) -> Result<O::Output> {
        let http = request.to_http()?;
        debug!(
            service = %O::SERVICE,
            operation = O::NAME,
            method = %http.method,
            path = %http.path(),
            "dispatching request"
        );

        let body = self
            .transport
            .execute(http)
            .await
            .map_err(|e| self.classify(O::NAME, e))?;

        decode::<O>(body)
    }

    /// Map a transport failure onto the service error taxonomy
    fn classify(&self, operation: &str, error: Error) -> Error {
        match error {
            Error::HttpStatus { status, body } => {
                let (code, message) = parse_service_error(&body);
                Error::remote_service(operation, status, code, message)
            }
            e if is_name_resolution_failure(&e) => Error::EndpointResolution {
                endpoint: self.endpoint().to_string(),
                source: Box::new(e),
            },
            e => e,
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("endpoint", &self.endpoint())
            .finish_non_exhaustive()
    }
}

fn decode<O: Operation>(body: JsonValue) -> Result<O::Output> {
    serde_json::from_value(body).map_err(|e| Error::decode(O::NAME, e.to_string()))
}

/// Check every error in the source chain for a name lookup failure
pub fn is_name_resolution_failure(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        let text = err.to_string().to_ascii_lowercase();
        if NAME_RESOLUTION_MARKERS.iter().any(|m| text.contains(m)) {
            return true;
        }
        current = err.source();
    }
    false
}

/// Extract `(code, message)` from an AWS JSON error body
///
/// `__type` may carry a namespace (`aws.clouddirectory#Code`) or a trailing
/// `:url` section; both are stripped.
pub fn parse_service_error(body: &str) -> (String, String) {
    let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(body) else {
        return ("UnknownError".to_string(), body.to_string());
    };

    let code = ["__type", "code", "Code"]
        .iter()
        .find_map(|k| map.get(*k).and_then(JsonValue::as_str))
        .map_or("UnknownError", |raw| {
            let raw = raw.rsplit('#').next().unwrap_or(raw);
            raw.split(':').next().unwrap_or(raw)
        })
        .to_string();

    let message = ["message", "Message", "errorMessage"]
        .iter()
        .find_map(|k| map.get(*k).and_then(JsonValue::as_str))
        .unwrap_or_default()
        .to_string();

    (code, message)
}
