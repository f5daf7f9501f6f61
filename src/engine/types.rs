//! Engine types
//!
//! Messages emitted by an invocation.

use crate::types::{JsonValue, LogLevel};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Output of an invocation; errors travel as `Err` elements, never as messages
pub type MessageStream = BoxStream<'static, crate::Result<Message>>;

/// A message emitted during an invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// One item of a paged operation
    Item {
        /// Operation name
        operation: String,
        /// The item
        item: JsonValue,
    },
    /// Whole response of a single-call operation
    Response {
        /// Operation name
        operation: String,
        /// The decoded response
        response: JsonValue,
    },
    /// Token to resume a paged operation from
    NextToken {
        /// Operation name
        operation: String,
        /// Opaque continuation token
        next_token: String,
    },
    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create an item message
    pub fn item(operation: impl Into<String>, item: JsonValue) -> Self {
        Self::Item {
            operation: operation.into(),
            item,
        }
    }

    /// Create a response message
    pub fn response(operation: impl Into<String>, response: JsonValue) -> Self {
        Self::Response {
            operation: operation.into(),
            response,
        }
    }

    /// Create a resume-token message
    pub fn next_token(operation: impl Into<String>, token: impl Into<String>) -> Self {
        Self::NextToken {
            operation: operation.into(),
            next_token: token.into(),
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create an info log
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Check if this is an item message
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item { .. })
    }

    /// Check if this is a resume-token message
    pub fn is_next_token(&self) -> bool {
        matches!(self, Self::NextToken { .. })
    }

    /// Check if this is a log message
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }

    /// The payload a caller prints: the item, the response or the token
    pub fn payload(&self) -> Option<JsonValue> {
        match self {
            Self::Item { item, .. } => Some(item.clone()),
            Self::Response { response, .. } => Some(response.clone()),
            Self::NextToken { next_token, .. } => {
                Some(serde_json::json!({ "NextToken": next_token }))
            }
            Self::Log { .. } => None,
        }
    }
}
