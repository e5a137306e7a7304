//! Offset pagination aggregator.
//!
//! [`QueryAggregator`] turns an unknown number of paged responses into one
//! logical result set. Pages are requested one after another; each new offset
//! is the previous offset plus the number of rows the server actually
//! returned, and the listing ends on the first empty page.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, SnipeError};
use crate::models::Record;
use crate::pagination::{OffsetParams, Page, PageResponse};
use crate::traits::Transport;

/// Default maximum pages to fetch (safety limit).
pub const MAX_PAGES: u32 = 10_000;

/// Query-string filter applied to every page of a listing.
///
/// Keys are kept sorted so equal filters hash and compare equal regardless of
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filter(BTreeMap<String, String>);

impl Filter {
    /// An empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a key/value pair.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Look up a filter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Filter as query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// What to do when a page after the first one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingPageFailure {
    /// Keep the rows gathered so far and stop paging.
    #[default]
    Truncate,
    /// Fail the whole query.
    Fail,
}

/// Result of a query: a merged listing or a bare entity.
#[derive(Debug, Clone)]
pub enum Fetched {
    /// Every row of a paginated endpoint, in server order.
    Rows(Vec<Record>),
    /// The untouched body of a non-paginated endpoint.
    Single(Value),
}

impl Fetched {
    /// The merged rows.
    ///
    /// # Errors
    ///
    /// Returns [`SnipeError::UnexpectedResponse`] for a non-paginated body.
    pub fn into_rows(self) -> Result<Vec<Record>> {
        match self {
            Fetched::Rows(rows) => Ok(rows),
            Fetched::Single(_) => Err(SnipeError::UnexpectedResponse(
                "expected a paginated listing with 'rows'".to_string(),
            )),
        }
    }

    /// The response as a single JSON value; rows are wrapped in an array.
    pub fn into_value(self) -> Value {
        match self {
            Fetched::Rows(rows) => Value::Array(rows),
            Fetched::Single(value) => value,
        }
    }
}

/// Fetches complete listings through a [`Transport`].
///
/// # Example
///
/// ```ignore
/// use snipe_report::{Filter, QueryAggregator, SnipeClient};
///
/// let client = SnipeClient::new("token", "https://snipeit.example.org/api/v1/")?;
/// let aggregator = QueryAggregator::new(client);
/// let laptops = aggregator
///     .fetch_rows("hardware", &Filter::new().with("category_id", 1))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryAggregator<T> {
    transport: T,
    trailing_page_failure: TrailingPageFailure,
    max_pages: u32,
}

impl<T: Transport> QueryAggregator<T> {
    /// Create an aggregator with the default [`TrailingPageFailure::Truncate`]
    /// policy.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            trailing_page_failure: TrailingPageFailure::default(),
            max_pages: MAX_PAGES,
        }
    }

    /// Choose how failures on continuation pages are handled.
    #[must_use]
    pub fn with_trailing_page_failure(mut self, policy: TrailingPageFailure) -> Self {
        self.trailing_page_failure = policy;
        self
    }

    /// Stop after `max_pages` pages even if no empty page has been seen.
    ///
    /// Defaults to [`MAX_PAGES`]; values below one are treated as one.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every page of `resource` matching `filter`.
    ///
    /// The first page decides the shape: without a `rows` field the body is
    /// returned as [`Fetched::Single`]. Otherwise pages are requested at
    /// increasing offsets until one comes back empty.
    ///
    /// # Errors
    ///
    /// Returns [`SnipeError::RequestFailed`] if the first page fails, or if a
    /// later page fails under [`TrailingPageFailure::Fail`].
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, resource: &str, filter: &Filter) -> Result<Fetched> {
        let first = self
            .fetch_page(resource, filter, 0)
            .await
            .map_err(|e| SnipeError::request_failed(resource, e))?;

        let first = match first {
            PageResponse::Unpaged(value) => return Ok(Fetched::Single(value)),
            PageResponse::Page(page) => page,
        };

        let total = first.total;
        let mut offset = first.next_offset();
        let mut done = first.is_empty();
        let mut rows = first.rows;
        let mut pages = 1;

        while !done {
            if pages >= self.max_pages {
                tracing::warn!(
                    "Reached pagination limit of {} pages for '{}', stopping",
                    self.max_pages,
                    resource
                );
                break;
            }

            match self.fetch_continuation(resource, filter, offset).await {
                Ok(page) => {
                    pages += 1;
                    offset = page.next_offset();
                    done = page.is_empty();
                    rows.extend(page.rows);
                }
                Err(e) => match self.trailing_page_failure {
                    TrailingPageFailure::Truncate => {
                        tracing::warn!(
                            error = %e,
                            offset,
                            "page fetch failed for '{}', keeping {} rows",
                            resource,
                            rows.len()
                        );
                        break;
                    }
                    TrailingPageFailure::Fail => {
                        return Err(SnipeError::request_failed(resource, e));
                    }
                },
            }
        }

        if let Some(total) = total {
            if total != rows.len() as u64 {
                tracing::debug!(total, fetched = rows.len(), "row count differs from reported total");
            }
        }

        Ok(Fetched::Rows(rows))
    }

    /// Fetch a paginated listing and return only its rows.
    ///
    /// # Errors
    ///
    /// As [`QueryAggregator::fetch`], plus
    /// [`SnipeError::UnexpectedResponse`] if the endpoint is not paginated.
    pub async fn fetch_rows(&self, resource: &str, filter: &Filter) -> Result<Vec<Record>> {
        self.fetch(resource, filter).await?.into_rows()
    }

    /// Fetch a single entity endpoint with no filter.
    ///
    /// # Errors
    ///
    /// As [`QueryAggregator::fetch`].
    pub async fn fetch_one(&self, resource: &str) -> Result<Value> {
        Ok(self.fetch(resource, &Filter::new()).await?.into_value())
    }

    async fn fetch_page(&self, resource: &str, filter: &Filter, offset: u64) -> Result<PageResponse> {
        let mut query = filter.to_query();
        OffsetParams::at(offset).apply(&mut query);

        let body = self.transport.get_json(resource, &query).await?;
        let response = PageResponse::parse(body, offset)?;
        if let PageResponse::Page(ref page) = response {
            tracing::debug!(offset, rows = page.len(), "fetched page");
        }
        Ok(response)
    }

    async fn fetch_continuation(&self, resource: &str, filter: &Filter, offset: u64) -> Result<Page> {
        match self.fetch_page(resource, filter, offset).await? {
            PageResponse::Page(page) => Ok(page),
            PageResponse::Unpaged(_) => Err(SnipeError::UnexpectedResponse(format!(
                "page at offset {offset} has no 'rows'"
            ))),
        }
    }
}
