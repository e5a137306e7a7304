//! Pagination utilities for Snipe-IT list responses.
//!
//! Snipe-IT list endpoints answer with `{"total": n, "rows": [...]}` and
//! accept an `offset` query parameter. Endpoints that return a single entity
//! have no `rows` field at all.

use serde_json::Value;

use crate::error::{Result, SnipeError};

/// A page of rows from a Snipe-IT list endpoint.
#[derive(Debug, Clone)]
pub struct Page {
    /// The rows on this page, in server order.
    pub rows: Vec<Value>,
    /// Total number of rows across all pages, as reported by the server.
    pub total: Option<u64>,
    /// Offset this page was requested at.
    pub offset: u64,
}

impl Page {
    /// Create a new page from rows and pagination info.
    #[must_use]
    pub fn new(rows: Vec<Value>, offset: u64, total: Option<u64>) -> Self {
        Self {
            rows,
            total,
            offset,
        }
    }

    /// Offset of the page that follows this one.
    #[must_use]
    pub fn next_offset(&self) -> u64 {
        self.offset + self.rows.len() as u64
    }

    /// Returns true if this page has no rows, which ends a listing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// A decoded response body: either a page of rows or a bare entity.
#[derive(Debug, Clone)]
pub enum PageResponse {
    /// The body carried a `rows` array.
    Page(Page),
    /// The body had no `rows` field; it is returned untouched.
    Unpaged(Value),
}

impl PageResponse {
    /// Classify a response body fetched at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`SnipeError::UnexpectedResponse`] if `rows` is present but is
    /// not an array.
    pub fn parse(body: Value, offset: u64) -> Result<Self> {
        let Value::Object(mut map) = body else {
            return Ok(PageResponse::Unpaged(body));
        };

        let Some(rows) = map.remove("rows") else {
            return Ok(PageResponse::Unpaged(Value::Object(map)));
        };

        let total = map.get("total").and_then(Value::as_u64);
        match rows {
            Value::Array(rows) => Ok(PageResponse::Page(Page::new(rows, offset, total))),
            Value::Null => Ok(PageResponse::Page(Page::new(Vec::new(), offset, total))),
            other => Err(SnipeError::UnexpectedResponse(format!(
                "expected 'rows' to be an array, got {other}"
            ))),
        }
    }
}

/// Query parameters for an offset-paginated request.
#[derive(Debug, Clone, Default)]
pub struct OffsetParams {
    /// Row offset; omitted from the request when zero.
    pub offset: u64,
}

impl OffsetParams {
    /// Pagination params for a specific offset.
    #[must_use]
    pub fn at(offset: u64) -> Self {
        Self { offset }
    }

    /// Append the `offset` pair to `query` unless this is the first page.
    pub fn apply(&self, query: &mut Vec<(String, String)>) {
        if self.offset > 0 {
            query.push(("offset".to_string(), self.offset.to_string()));
        }
    }
}
