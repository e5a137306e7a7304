//! Transport trait for issuing raw API requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Issue a GET request and return the decoded JSON body.
///
/// Implemented by [`SnipeClient`](crate::SnipeClient) for real traffic. The
/// pagination logic in [`QueryAggregator`](crate::QueryAggregator) only talks
/// to this trait, so tests can substitute an in-memory implementation.
///
/// # Example
///
/// ```ignore
/// use snipe_report::{SnipeClient, Transport};
///
/// let client = SnipeClient::new("token", "https://snipeit.example.org/api/v1/")?;
/// let body = client
///     .get_json("hardware", &[("category_id".to_string(), "1".to_string())])
///     .await?;
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `path` (relative to the API root) with the given query pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the server answers
    /// with a non-success status, or the body is not JSON.
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        (**self).get_json(path, query).await
    }
}
