//! Handlers for users and reference data listings.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{check_auth, list_response, ListQuery};
use crate::mock_server::state::MockState;

async fn list_of(
    state: Arc<RwLock<MockState>>,
    headers: HeaderMap,
    query: ListQuery,
    select: fn(&MockState) -> &Vec<Value>,
) -> Response {
    let mut state = state.write().await;
    state.request_count += 1;

    if let Some(denied) = check_auth(&state, &headers) {
        return denied;
    }

    let items: Vec<&Value> = select(&state).iter().collect();
    list_response(&state, &items, &query)
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    list_of(state, headers, query, |s| &s.users).await
}

/// GET /models
pub async fn list_models(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    list_of(state, headers, query, |s| &s.models).await
}

/// GET /manufacturers
pub async fn list_manufacturers(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    list_of(state, headers, query, |s| &s.manufacturers).await
}

/// GET /statuslabels
pub async fn list_status_labels(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    list_of(state, headers, query, |s| &s.status_labels).await
}
