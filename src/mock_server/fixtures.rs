//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic Snipe-IT records.

use serde_json::{json, Value};

use super::state::MockState;

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A status label as `(id, name, status_type)`.
pub type StatusLabel = (u64, &'static str, &'static str);

impl Fixtures {
    pub const READY: StatusLabel = (1, "Ready to Deploy", "deployable");
    pub const REQUESTABLE: StatusLabel = (2, "Requestable", "deployable");
    pub const PENDING: StatusLabel = (3, "Pending", "pending");
    pub const ARCHIVED: StatusLabel = (4, "Archived", "archived");

    // =========================================================================
    // Reference data
    // =========================================================================

    pub fn manufacturer(id: u64, name: &str) -> Value {
        json!({ "id": id, "name": name, "assets_count": 0 })
    }

    /// A model in the given category (`Laptop`, `Monitor`, ...).
    pub fn model(id: u64, name: &str, manufacturer: &str, category: &str) -> Value {
        let category_id = if category == "Laptop" { 1 } else { 2 };
        json!({
            "id": id,
            "name": name,
            "manufacturer": { "id": manufacturer_id(manufacturer), "name": manufacturer },
            "category": { "id": category_id, "name": category },
            "assets_count": 0
        })
    }

    pub fn status_label((id, name, status_type): StatusLabel) -> Value {
        json!({ "id": id, "name": name, "type": status_type })
    }

    pub fn user(id: u64, username: &str) -> Value {
        json!({
            "id": id,
            "username": username,
            "name": username,
            "email": format!("{username}@example.org")
        })
    }

    // =========================================================================
    // Assets
    // =========================================================================

    /// A laptop with the model implied by its manufacturer.
    pub fn laptop(
        id: u64,
        asset_tag: &str,
        manufacturer: &str,
        (status_id, status_name, status_type): StatusLabel,
        assigned_to: Option<&str>,
    ) -> Value {
        let model = if manufacturer == "Apple" {
            "MacBook Pro"
        } else {
            "ThinkPad X1 Carbon"
        };

        json!({
            "id": id,
            "name": format!("laptop-{id}"),
            "asset_tag": asset_tag,
            "serial": format!("SN{id:06}"),
            "model": { "id": manufacturer_id(manufacturer), "name": model },
            "model_number": "",
            "category": { "id": 1, "name": "Laptop" },
            "manufacturer": { "id": manufacturer_id(manufacturer), "name": manufacturer },
            "status_label": {
                "id": status_id,
                "name": status_name,
                "status_type": status_type,
                "status_meta": status_type
            },
            "assigned_to": assigned_to.map(|username| json!({
                "id": id + 100,
                "username": username,
                "name": username,
                "type": "user"
            })),
            "purchase_cost": "1,200.00",
            "purchase_date": null,
            "warranty_expires": null,
            "in_warranty": false,
            "requestable": false,
            "created_at": { "datetime": "2019-06-15 10:00:00", "formatted": "2019-06-15 10:00 AM" },
            "updated_at": { "datetime": "2021-01-01 10:00:00", "formatted": "2021-01-01 10:00 AM" },
            "available_actions": { "checkout": true, "checkin": true }
        })
    }

    /// An unassigned requestable laptop.
    pub fn spare_laptop(id: u64, asset_tag: &str, manufacturer: &str) -> Value {
        let mut laptop = Self::laptop(id, asset_tag, manufacturer, Self::REQUESTABLE, None);
        laptop["requestable"] = json!(true);
        laptop
    }

    /// A laptop under warranty until `expires` (`YYYY-MM-DD`).
    pub fn warranty_laptop(id: u64, asset_tag: &str, assigned_to: &str, expires: &str) -> Value {
        let mut laptop = Self::laptop(id, asset_tag, "Lenovo", Self::READY, Some(assigned_to));
        laptop["in_warranty"] = json!(true);
        laptop["warranty_expires"] = json!({ "date": expires, "formatted": expires });
        laptop
    }

    /// A non-laptop asset.
    pub fn monitor(id: u64, asset_tag: &str) -> Value {
        let mut monitor = Self::laptop(id, asset_tag, "Dell", Self::READY, Some("carol"));
        monitor["category"] = json!({ "id": 2, "name": "Monitor" });
        monitor["model"] = json!({ "id": 3, "name": "UltraSharp U2720Q" });
        monitor
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A small fleet with staff laptops, spares, an archived machine and a
    /// monitor, served two rows per page.
    pub fn default_scenario() -> MockState {
        MockState::new()
            .with_page_size(2)
            .with_manufacturer(Self::manufacturer(1, "Apple"))
            .with_manufacturer(Self::manufacturer(2, "Lenovo"))
            .with_manufacturer(Self::manufacturer(3, "Dell"))
            .with_model(Self::model(1, "MacBook Pro", "Apple", "Laptop"))
            .with_model(Self::model(2, "ThinkPad X1 Carbon", "Lenovo", "Laptop"))
            .with_model(Self::model(3, "UltraSharp U2720Q", "Dell", "Monitor"))
            .with_status_label(Self::status_label(Self::READY))
            .with_status_label(Self::status_label(Self::REQUESTABLE))
            .with_status_label(Self::status_label(Self::PENDING))
            .with_status_label(Self::status_label(Self::ARCHIVED))
            .with_user(Self::user(101, "alice"))
            .with_user(Self::user(102, "bob"))
            .with_user(Self::user(103, "carol"))
            .with_user(Self::user(104, "dave"))
            .with_asset(Self::laptop(1, "2019061501", "Apple", Self::READY, Some("alice")))
            .with_asset(Self::warranty_laptop(2, "2021030201", "bob", "2024-03-02"))
            .with_asset(Self::laptop(3, "2022110701", "Lenovo", Self::PENDING, Some("alice")))
            .with_asset(Self::spare_laptop(4, "oldspare03", "Lenovo"))
            .with_asset(Self::spare_laptop(5, "000000042", "Apple"))
            .with_asset(Self::laptop(6, "2016010101", "Lenovo", Self::ARCHIVED, None))
            .with_asset(Self::monitor(7, "2020020201"))
    }
}

fn manufacturer_id(name: &str) -> u64 {
    match name {
        "Apple" => 1,
        "Lenovo" => 2,
        "Dell" => 3,
        _ => 99,
    }
}
