//! Scripted transport for unit tests

use super::types::Transport;
use crate::error::{Error, Result};
use crate::http::HttpRequest;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub type RequestLog = Arc<Mutex<Vec<HttpRequest>>>;

/// Replays queued responses in order and records every request it sees
pub struct MockTransport {
    endpoint: String,
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    requests: RequestLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            endpoint: "https://mock.amazonaws.test".to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn respond(self, body: JsonValue) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn fail(self, error: Error) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn request_log(&self) -> RequestLog {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<JsonValue> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted response left".to_string())))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
