//! Snipe-IT API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Pagination and caching are layered on top via [`Transport`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{Result, SnipeError};
use crate::traits::Transport;

const USER_AGENT: &str = concat!("snipe-report/", env!("CARGO_PKG_VERSION"));

/// Low-level Snipe-IT API client.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use snipe_report::{Config, SnipeClient};
///
/// # fn example() -> snipe_report::Result<()> {
/// let config = Config::default();
/// let client = SnipeClient::from_config(&config)?;
///
/// // Or configure manually
/// let client = SnipeClient::new("your-api-key", "https://snipeit.example.org/api/v1/")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SnipeClient {
    http: Client,
    api_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for SnipeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnipeClient")
            .field("api_url", &self.api_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SnipeClient {
    /// Create a client from a [`Config`], reading the API key file.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key file is missing or empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.load_api_key()?;
        Self::new(&token, config.api_url.as_str())
    }

    /// Create a new client with the provided token and API root.
    ///
    /// # Arguments
    ///
    /// * `token` - Snipe-IT personal access token
    /// * `api_url` - API root (e.g., `https://snipeit.example.org/api/v1/`)
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        // Ensure the API root ends with / so joins stay under it
        let api_url_str = if api_url.ends_with('/') {
            api_url.to_string()
        } else {
            format!("{api_url}/")
        };

        let api_url = Url::parse(&api_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SnipeError::HttpError)?;

        Ok(Self {
            http,
            api_url: Arc::new(api_url),
            token: token.to_string(),
        })
    }

    /// Get the API root.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query(&self, path: &str, query: &[(String, String)]) -> Result<Response> {
        let url = self.api_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(SnipeError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err(SnipeError::ApiError {
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

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = error_message(&json) {
                return msg;
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

/// Pull a human-readable message out of a Snipe-IT error body.
///
/// Snipe-IT uses `messages`, which may be a string or an object of field
/// errors; other gateways in front of it use `message` or `error`.
pub(crate) fn error_message(json: &Value) -> Option<String> {
    for key in ["messages", "message", "error"] {
        match json.get(key) {
            Some(Value::String(s)) => return Some(s.clone()),
            Some(other @ Value::Object(_)) => return Some(other.to_string()),
            _ => {}
        }
    }
    None
}

#[async_trait]
impl Transport for SnipeClient {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let response = self.get_with_query(path, query).await?;
        let body: Value = response.json().await.map_err(SnipeError::HttpError)?;
        Ok(body)
    }
}
