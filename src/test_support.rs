//! In-memory transports for unit tests

use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::{JsonValue, RequestParams};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Replays a fixed list of responses and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<JsonValue>>>,
    calls: Mutex<Vec<RequestParams>>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = JsonValue>) -> Self {
        Self::with_results(responses.into_iter().map(Ok))
    }

    pub fn with_results(responses: impl IntoIterator<Item = Result<JsonValue>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RequestParams> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, params: &RequestParams) -> Result<JsonValue> {
        self.calls.lock().unwrap().push(params.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("script exhausted".to_string())))
    }
}

/// Never answers within any reasonable test deadline
pub struct HangingTransport;

#[async_trait]
impl Transport for HangingTransport {
    async fn get(&self, _params: &RequestParams) -> Result<JsonValue> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(JsonValue::Null)
    }
}
