//! Transport trait for issuing requests against the remote API.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Per-request options for [`Transport::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOptions {
    /// Whether an intermediate cache may answer the request.
    pub cache: bool,
}

impl GetOptions {
    /// Options that bypass any cache.
    pub const fn uncached() -> Self {
        Self { cache: false }
    }
}

impl Default for GetOptions {
    fn default() -> Self {
        Self { cache: true }
    }
}

/// The HTTP collaborator the resource layer talks through.
///
/// Implementations decode response bodies into generic JSON values and
/// surface non-success statuses as errors. Retry, backoff and timeouts are
/// the implementation's business.
///
/// # Example
///
/// ```ignore
/// use octopi::{ApiClient, Transport, GetOptions};
///
/// let client = ApiClient::from_env()?;
/// let body = client.get("/user/show/fcoury", GetOptions::default()).await?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and return the decoded body.
    async fn get(&self, path: &str, options: GetOptions) -> Result<Value>;

    /// Issue a form-encoded POST and return the decoded body.
    async fn post(&self, path: &str, params: &[(String, String)]) -> Result<Value>;

    /// True when no write-capable credentials are present.
    fn read_only(&self) -> bool;
}
