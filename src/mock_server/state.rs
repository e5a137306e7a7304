//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Snipe-IT API server.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::models::resolve;

/// Default `limit` of Snipe-IT list endpoints.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Assets of every category, in server order.
    pub hardware: Vec<Value>,

    pub users: Vec<Value>,

    pub models: Vec<Value>,

    pub manufacturers: Vec<Value>,

    pub status_labels: Vec<Value>,

    /// Rows per page when the request has no `limit`.
    pub page_size: usize,

    /// Requests at this offset answer with a 500.
    pub failing_offset: Option<u64>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Number of list and lookup requests served.
    pub request_count: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            hardware: Vec::new(),
            users: Vec::new(),
            models: Vec::new(),
            manufacturers: Vec::new(),
            status_labels: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            failing_offset: None,
            required_token: None,
            request_count: 0,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add an asset.
    pub fn with_asset(mut self, asset: Value) -> Self {
        self.hardware.push(asset);
        self
    }

    /// Add a user.
    pub fn with_user(mut self, user: Value) -> Self {
        self.users.push(user);
        self
    }

    /// Add a model.
    pub fn with_model(mut self, model: Value) -> Self {
        self.models.push(model);
        self
    }

    /// Add a manufacturer.
    pub fn with_manufacturer(mut self, manufacturer: Value) -> Self {
        self.manufacturers.push(manufacturer);
        self
    }

    /// Add a status label.
    pub fn with_status_label(mut self, label: Value) -> Self {
        self.status_labels.push(label);
        self
    }

    /// Set the default page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make every request at `offset` fail.
    pub fn with_failing_offset(mut self, offset: u64) -> Self {
        self.failing_offset = Some(offset);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Hardware matching Snipe-IT's `category_id` and `status` filters.
    ///
    /// Without `status`, archived assets are hidden. `Requestable` selects
    /// requestable non-archived assets, `Archived` selects archived ones, and
    /// any other value matches the status label name.
    pub fn list_hardware(&self, category_id: Option<u64>, status: Option<&str>) -> Vec<&Value> {
        self.hardware
            .iter()
            .filter(|asset| {
                category_id.map_or(true, |id| resolve(asset, "category.id").as_u64() == Some(id))
            })
            .filter(|asset| {
                let archived = resolve(asset, "status_label.status_type").as_str() == Some("archived");
                match status {
                    None => !archived,
                    Some("Archived") => archived,
                    Some("Requestable") => {
                        !archived && resolve(asset, "requestable").as_bool() == Some(true)
                    }
                    Some(name) => resolve(asset, "status_label.name").as_str() == Some(name),
                }
            })
            .collect()
    }

    /// Find an asset by tag.
    pub fn asset_by_tag(&self, tag: &str) -> Option<&Value> {
        self.hardware
            .iter()
            .find(|asset| asset.get("asset_tag").and_then(Value::as_str) == Some(tag))
    }
}

/// Slice `items` into a Snipe-IT list body.
pub fn page_body(items: &[&Value], offset: usize, limit: usize) -> Value {
    let rows: Vec<Value> = items.iter().skip(offset).take(limit).map(|v| (*v).clone()).collect();
    json!({ "total": items.len(), "rows": rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_list_hardware_filters() {
        let state = MockState::new()
            .with_asset(Fixtures::laptop(1, "2019061501", "Lenovo", Fixtures::READY, Some("alice")))
            .with_asset(Fixtures::spare_laptop(2, "oldspare03", "Apple"))
            .with_asset(Fixtures::laptop(3, "2015010101", "Lenovo", Fixtures::ARCHIVED, None))
            .with_asset(Fixtures::monitor(4, "2020020201"));

        assert_eq!(state.list_hardware(None, None).len(), 3);
        assert_eq!(state.list_hardware(Some(1), None).len(), 2);
        assert_eq!(state.list_hardware(Some(1), Some("Requestable")).len(), 1);
        assert_eq!(state.list_hardware(Some(1), Some("Archived")).len(), 1);
    }

    #[test]
    fn test_page_body() {
        let a = json!({"id": 1});
        let b = json!({"id": 2});
        let c = json!({"id": 3});
        let items = vec![&a, &b, &c];

        let body = page_body(&items, 2, 2);
        assert_eq!(body, json!({"total": 3, "rows": [{"id": 3}]}));

        let body = page_body(&items, 3, 2);
        assert_eq!(body["rows"], json!([]));
    }
}
