//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

use crate::transport::{ApiError, Request, Transport};

/// Records every request and replays scripted results in order.
///
/// When the script runs dry it answers `null`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<Value, ApiError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests().pop()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Value, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

/// Convert a `json!({...})` literal into a [`crate::Payload`].
pub fn payload(value: Value) -> crate::Payload {
    match value {
        Value::Object(map) => map,
        _ => crate::Payload::new(),
    }
}
