//! Hardware endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{check_auth, list_response, ListQuery};
use crate::mock_server::state::MockState;

/// GET /hardware
pub async fn list_hardware(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let mut state = state.write().await;
    state.request_count += 1;

    if let Some(denied) = check_auth(&state, &headers) {
        return denied;
    }

    let assets = state.list_hardware(query.category_id, query.status.as_deref());
    list_response(&state, &assets, &query)
}

/// GET /hardware/bytag/{tag}
pub async fn get_hardware_by_tag(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> Response {
    let mut state = state.write().await;
    state.request_count += 1;

    if let Some(denied) = check_auth(&state, &headers) {
        return denied;
    }

    // URL-decode the tag
    let decoded_tag = urlencoding::decode(&tag)
        .map(|s| s.into_owned())
        .unwrap_or(tag);

    match state.asset_by_tag(&decoded_tag) {
        Some(asset) => (StatusCode::OK, Json(asset.clone())).into_response(),
        // Snipe-IT reports a missing asset in a 200 envelope
        None => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "error",
                "messages": "Asset does not exist.",
                "payload": null
            })),
        )
            .into_response(),
    }
}
