//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use octopi::{GetOptions, OctopiError, Result, Transport};
use serde_json::{json, Value};

/// A transport that serves canned bodies and records every request path
/// in the order it was issued.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: HashMap<String, Value>,
    log: Mutex<Vec<String>>,
    read_only: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    /// Serve `/user/show/{login}` with a minimal user record.
    pub fn with_user(self, login: &str) -> Self {
        let path = format!("/user/show/{login}");
        self.respond(&path, json!({ "user": { "login": login } }))
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, path: &str, _options: GetOptions) -> Result<Value> {
        self.log.lock().unwrap().push(path.to_string());
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| OctopiError::ApiError {
                message: "Not Found".to_string(),
                status_code: Some(404),
            })
    }

    async fn post(&self, path: &str, _params: &[(String, String)]) -> Result<Value> {
        self.get(path, GetOptions::default()).await
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}
