//! Error types for Snipe-IT reporting operations.

use thiserror::Error;

/// Errors that can occur while fetching inventory or building reports.
#[derive(Debug, Error)]
pub enum SnipeError {
    /// Configuration is missing or incomplete.
    #[error("Snipe-IT configuration required: {0}")]
    ConfigMissing(String),

    /// A logical query failed on its first page.
    #[error("request '{operation}' failed: {source}")]
    RequestFailed {
        operation: String,
        #[source]
        source: Box<SnipeError>,
    },

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request returned a non-success status.
    #[error("Snipe-IT API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// The response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SnipeError {
    /// Wrap a transport error with the logical operation that issued it.
    pub fn request_failed(operation: impl Into<String>, source: SnipeError) -> Self {
        SnipeError::RequestFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// HTTP status code of the failure, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SnipeError::ApiError { status_code, .. } => *status_code,
            SnipeError::RequestFailed { source, .. } => source.status_code(),
            SnipeError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Snipe-IT operations.
pub type Result<T> = core::result::Result<T, SnipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_names_operation() {
        let err = SnipeError::request_failed(
            "hardware",
            SnipeError::ApiError {
                message: "Unauthorized".to_string(),
                status_code: Some(401),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("hardware"));
        assert!(msg.contains("Unauthorized"));
        assert_eq!(err.status_code(), Some(401));
    }
}
