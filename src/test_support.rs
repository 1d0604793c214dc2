//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{OctopiError, Result};
use crate::traits::{GetOptions, Transport};

/// Serves canned bodies by path and records every request.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
    read_only: bool,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    pub(crate) fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn serve(&self, path: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(path.to_string());
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| OctopiError::ApiError {
                message: "Not Found".to_string(),
                status_code: Some(404),
            })
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, path: &str, _options: GetOptions) -> Result<Value> {
        self.serve(path)
    }

    async fn post(&self, path: &str, _params: &[(String, String)]) -> Result<Value> {
        self.serve(path)
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}
