//! Execution engine module
//!
//! Name-based invocation over the typed operations.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Engine` - one dispatcher per configured service, invoke by name
//! - `catalog` - registry of every operation and its paging behaviour
//! - Message types for output (Item, Response, NextToken, Log)

pub mod catalog;
mod types;

pub use catalog::OperationEntry;
pub use types::{Message, MessageStream};

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::PageOptions;
use crate::types::{JsonValue, Service};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::debug;

/// Invokes catalog operations against configured endpoints
#[derive(Debug, Clone, Default)]
pub struct Engine {
    dispatchers: HashMap<Service, Dispatcher>,
}

impl Engine {
    /// Create an engine with no services configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Build one HTTP-backed dispatcher per service that has an endpoint
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut engine = Self::new();
        for service in Service::ALL {
            if config.endpoint(service).is_none() {
                continue;
            }
            let client = HttpClient::with_config(config.http_client_config(service)?)?;
            debug!(%service, endpoint = %client.config().base_url, "Configured service");
            engine = engine.with_dispatcher(service, Dispatcher::new(client));
        }
        Ok(engine)
    }

    /// Use `dispatcher` for `service`
    #[must_use]
    pub fn with_dispatcher(mut self, service: Service, dispatcher: Dispatcher) -> Self {
        self.dispatchers.insert(service, dispatcher);
        self
    }

    /// Dispatcher for a service
    pub fn dispatcher(&self, service: Service) -> Result<&Dispatcher> {
        self.dispatchers
            .get(&service)
            .ok_or_else(|| Error::missing_field(format!("endpoints.{}", service.id())))
    }

    /// Invoke an operation by name with JSON input
    ///
    /// Paging options are ignored for single-call operations; a warning
    /// message is emitted ahead of the response when any were given.
    pub fn invoke(
        &self,
        service: Service,
        operation: &str,
        input: JsonValue,
        options: PageOptions,
    ) -> Result<MessageStream> {
        let entry = catalog::find(service, operation)?;
        let dispatcher = self.dispatcher(service)?.clone();

        debug!(%service, operation = entry.name, paged = entry.is_paged(), "Invoking");

        let ignored = !entry.is_paged()
            && (options.starting_token.is_some()
                || options.page_size.is_some()
                || options.max_items.is_some()
                || options.mode.is_some());

        let messages = entry.invoke(dispatcher, input, options)?;
        if ignored {
            let note = Message::warn(format!(
                "{} is not paginated; paging options were ignored",
                entry.name
            ));
            return Ok(stream::once(async move { Ok(note) }).chain(messages).boxed());
        }
        Ok(messages)
    }
}
