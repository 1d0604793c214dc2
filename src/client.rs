//! HTTP API client.
//!
//! Low-level client that handles authentication and raw requests.
//! Entity lookups go through the [`Transport`] trait it implements.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use crate::error::{OctopiError, Result};
use crate::traits::{GetOptions, Transport};

const DEFAULT_API_URL: &str = "https://github.com/api/v2/json";
const USER_AGENT: &str = concat!("octopi/", env!("CARGO_PKG_VERSION"));

/// Login and API token for a write-capable session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    login: String,
    token: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            token: token.into(),
        }
    }

    /// The authenticated login.
    pub fn login(&self) -> &str {
        &self.login
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

/// Low-level API client.
///
/// Without credentials the client is read-only: lookups work, but
/// operations such as listing keys or creating repositories are refused.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use octopi::{ApiClient, Credentials};
///
/// # fn example() -> octopi::Result<()> {
/// // Create from environment variables
/// let client = ApiClient::from_env()?;
///
/// // Or configure manually
/// let client = ApiClient::new(
///     "https://github.com/api/v2/json",
///     Some(Credentials::new("fcoury", "your-token")),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("login", &self.login())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from environment variables.
    ///
    /// Uses `OCTOPI_LOGIN` and `OCTOPI_TOKEN` for authentication (both or
    /// neither) and optionally `OCTOPI_API_URL` for the base URL (defaults
    /// to `https://github.com/api/v2/json`).
    ///
    /// # Errors
    ///
    /// Returns an error if only one of `OCTOPI_LOGIN` and `OCTOPI_TOKEN` is
    /// set.
    pub fn from_env() -> Result<Self> {
        let credentials = match (env::var("OCTOPI_LOGIN"), env::var("OCTOPI_TOKEN")) {
            (Ok(login), Ok(token)) => Some(Credentials::new(login, token)),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => {
                return Err(OctopiError::ConfigMissing(
                    "OCTOPI_TOKEN environment variable not set".to_string(),
                ))
            }
            (Err(_), Ok(_)) => {
                return Err(OctopiError::ConfigMissing(
                    "OCTOPI_LOGIN environment variable not set".to_string(),
                ))
            }
        };

        let base_url =
            env::var("OCTOPI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&base_url, credentials)
    }

    /// Create a new client for `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the API (e.g., `https://github.com/api/v2/json`)
    /// * `credentials` - Login and token, or `None` for a read-only session
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(OctopiError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The authenticated login, if any.
    pub fn login(&self) -> Option<&str> {
        self.credentials.as_ref().map(Credentials::login)
    }

    /// Resolve an API path against the base URL.
    ///
    /// Paths are always relative to the base, even with a leading `/`.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(format!("{}/token", c.login), Some(&c.token)),
            None => request,
        }
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(OctopiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(OctopiError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Try to parse as JSON and extract message field
        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }

    async fn decode(response: Response) -> Result<Value> {
        let response = Self::check_response(response).await?;
        let body = response.text().await.map_err(OctopiError::HttpError)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn get(&self, path: &str, options: GetOptions) -> Result<Value> {
        let mut request = self.authorize(self.http.get(self.url(path)?));
        if !options.cache {
            request = request.header(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        }

        let response = request.send().await.map_err(OctopiError::HttpError)?;
        Self::decode(response).await
    }

    #[tracing::instrument(skip(self, params))]
    async fn post(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        let response = self
            .authorize(self.http.post(self.url(path)?))
            .form(params)
            .send()
            .await
            .map_err(OctopiError::HttpError)?;

        Self::decode(response).await
    }

    fn read_only(&self) -> bool {
        self.credentials.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = ApiClient::new(
            "https://github.com/api/v2/json",
            Some(Credentials::new("fcoury", "test-token")),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("ApiClient"));
        assert!(debug.contains("base_url"));
        assert!(debug.contains("fcoury"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = ApiClient::new("https://github.com/api/v2/json", None).unwrap();
        let client2 = ApiClient::new("https://github.com/api/v2/json/", None).unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_paths_stay_under_base() {
        let client = ApiClient::new("https://github.com/api/v2/json", None).unwrap();
        let url = client.url("/user/show/fcoury").unwrap();
        assert_eq!(url.as_str(), "https://github.com/api/v2/json/user/show/fcoury");
    }

    #[test]
    fn test_read_only_without_credentials() {
        let anonymous = ApiClient::new("https://github.com/api/v2/json", None).unwrap();
        assert!(anonymous.read_only());
        assert_eq!(anonymous.login(), None);

        let authed = ApiClient::new(
            "https://github.com/api/v2/json",
            Some(Credentials::new("fcoury", "t")),
        )
        .unwrap();
        assert!(!authed.read_only());
        assert_eq!(authed.login(), Some("fcoury"));
    }
}
