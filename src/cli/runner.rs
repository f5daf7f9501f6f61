//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::engine::{catalog, Engine, Message};
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{PageOptions, PagingMode};
use crate::types::{JsonValue, LogLevel, Service};
use futures::StreamExt;
use serde_json::json;
use std::fs;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List { service } => self.list_operations(*service),
            Commands::Invoke {
                service,
                operation,
                input,
                input_file,
                starting_token,
                page_size,
                max_items,
                paginate,
                no_paginate,
            } => {
                let input = read_input(input.as_deref(), input_file.as_deref())?;
                let options = page_options(
                    starting_token.clone(),
                    *page_size,
                    *max_items,
                    paging_flag(*paginate, *no_paginate),
                );
                self.invoke(*service, operation, input, options).await
            }
        }
    }

    /// Load config file, then apply environment and `--endpoint` overrides
    fn load_config(&self, service: Service) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env();
        if let Some(endpoint) = &self.cli.endpoint {
            config = config.with_endpoint(service, endpoint.clone());
        }
        config.validate()?;
        Ok(config)
    }

    /// List operations in the catalog
    fn list_operations(&self, service: Option<Service>) -> Result<()> {
        let operations: Vec<JsonValue> = catalog::catalog()
            .iter()
            .filter(|e| service.map_or(true, |s| e.service == s))
            .map(|e| {
                json!({
                    "service": e.service,
                    "name": e.name,
                    "paged": e.is_paged(),
                    "default_mode": e.paging,
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "OPERATIONS",
            "operations": operations
        }));
        Ok(())
    }

    /// Invoke one operation and stream its messages to stdout
    async fn invoke(
        &self,
        service: Service,
        operation: &str,
        input: JsonValue,
        options: PageOptions,
    ) -> Result<()> {
        let config = self.load_config(service)?;
        let endpoint = config.endpoint_for(service)?.to_string();
        let engine = Engine::from_config(&config)?;

        let cancel = CancellationToken::new();
        let options = options.cancellation(cancel.clone());
        let interrupt = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted; stopping before the next page");
                    cancel.cancel();
                }
            })
        };

        info!(%service, operation, %endpoint, "Invoking operation");
        let result = self.drain(engine.invoke(service, operation, input, options)).await;
        interrupt.abort();

        let count = result?;
        debug!(count, "Invocation finished");
        if cancel.is_cancelled() {
            return Err(Error::Other("Interrupted".to_string()));
        }
        Ok(())
    }

    /// Print every message; returns the number of items and responses
    async fn drain(&self, messages: Result<crate::engine::MessageStream>) -> Result<usize> {
        let mut messages = messages?;
        let mut count = 0;
        while let Some(message) = messages.next().await {
            let message = message?;
            match &message {
                Message::Log { level, message } => log_message(*level, message),
                Message::NextToken { next_token, .. } => {
                    info!(
                        next_token = %next_token,
                        "More results available; resume with --starting-token"
                    );
                    self.output_engine_message(&message);
                }
                Message::Item { .. } | Message::Response { .. } => {
                    count += 1;
                    self.output_engine_message(&message);
                }
            }
        }
        Ok(count)
    }

    /// Output a JSON value
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }

    /// Output an engine message: the whole tagged message as JSON, the payload when pretty
    fn output_engine_message(&self, msg: &Message) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                if let Some(payload) = msg.payload() {
                    self.output_message(&payload);
                }
            }
        }
    }
}

fn log_message(level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace | LogLevel::Debug => debug!("{message}"),
        LogLevel::Info => info!("{message}"),
        LogLevel::Warn => warn!("{message}"),
        LogLevel::Error => error!("{message}"),
    }
}

/// Parse `--input` or `--input-file`; no input means an empty request
fn read_input(inline: Option<&str>, file: Option<&Path>) -> Result<JsonValue> {
    let text = match (inline, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?,
        (None, None) => return Ok(json!({})),
    };
    let value: JsonValue = serde_json::from_str(&text).context("Failed to parse input JSON")?;
    if !value.is_object() {
        return Err(Error::config("Input must be a JSON object"));
    }
    Ok(value)
}

fn paging_flag(paginate: bool, no_paginate: bool) -> Option<PagingMode> {
    match (paginate, no_paginate) {
        (true, _) => Some(PagingMode::Auto),
        (false, true) => Some(PagingMode::Manual),
        (false, false) => None,
    }
}

fn page_options(
    starting_token: Option<String>,
    page_size: Option<u32>,
    max_items: Option<usize>,
    mode: Option<PagingMode>,
) -> PageOptions {
    PageOptions {
        mode,
        starting_token,
        page_size,
        max_items,
        cancellation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    #[test_case(false, false => None; "operation default")]
    #[test_case(true, false => Some(PagingMode::Auto); "paginate")]
    #[test_case(false, true => Some(PagingMode::Manual); "no paginate")]
    fn test_paging_flag(paginate: bool, no_paginate: bool) -> Option<PagingMode> {
        paging_flag(paginate, no_paginate)
    }

    #[test]
    fn test_read_input_inline_and_default() {
        assert_eq!(read_input(None, None).unwrap(), json!({}));
        assert_eq!(
            read_input(Some(r#"{"MaxResults": 2}"#), None).unwrap(),
            json!({"MaxResults": 2})
        );
        assert!(read_input(Some("[1, 2]"), None).is_err());
        assert!(read_input(Some("{not json"), None).is_err());
    }

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"notificationConfigurationArn": "arn:x"}}"#).unwrap();
        let value = read_input(None, Some(file.path())).unwrap();
        assert_eq!(value["notificationConfigurationArn"], "arn:x");

        let err = read_input(None, Some(Path::new("/nonexistent/input.json"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_page_options() {
        let options = page_options(Some("tok".to_string()), Some(25), None, None);
        assert_eq!(options.starting_token.as_deref(), Some("tok"));
        assert_eq!(options.page_size, Some(25));
        assert!(options.mode.is_none());
        assert!(options.cancellation.is_none());
    }
}
