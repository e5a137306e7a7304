//! HTTP request handlers for the mock server.

pub mod hardware;
pub mod resources;

pub use hardware::*;
pub use resources::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::mock_server::state::{page_body, MockState};

/// Offset pagination parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub category_id: Option<u64>,
    pub status: Option<String>,
}

/// Reject the request if the state requires a token that was not sent.
pub(crate) fn check_auth(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    let required = state.required_token.as_ref()?;
    let expected = format!("Bearer {required}");
    let sent = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    if sent == Some(expected.as_str()) {
        None
    } else {
        Some(
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "status": "error",
                    "messages": "Unauthorized."
                })),
            )
                .into_response(),
        )
    }
}

/// Serve one page of `items`, or a 500 at the configured failing offset.
pub(crate) fn list_response(
    state: &MockState,
    items: &[&serde_json::Value],
    query: &ListQuery,
) -> Response {
    let offset = query.offset.unwrap_or(0);

    if state.failing_offset == Some(offset as u64) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "status": "error",
                "messages": format!("Simulated failure at offset {offset}")
            })),
        )
            .into_response();
    }

    let limit = query.limit.unwrap_or(state.page_size);
    (StatusCode::OK, Json(page_body(items, offset, limit))).into_response()
}
