//! Dispatch module
//!
//! Turns a typed operation into one remote call and back.
//!
//! # Overview
//!
//! - [`Operation`] - request shape, wire marshaling and response type
//! - [`Transport`] - the collaborator that carries the call (auth, retries, HTTP)
//! - [`Dispatcher`] - generic `send` plus error classification
//!
//! Failures returned by the transport are re-signaled as
//! [`Error::RemoteService`](crate::Error::RemoteService) when the service
//! answered with an error body, and as
//! [`Error::EndpointResolution`](crate::Error::EndpointResolution) when the
//! configured host name could not be resolved. Anything else passes through.

mod dispatcher;
mod types;

pub use dispatcher::{is_name_resolution_failure, parse_service_error, Dispatcher};
pub use types::{require, require_str, to_body, Operation, Transport};

#[cfg(test)]
pub(crate) mod mock;
