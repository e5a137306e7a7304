//! Laptop cohorts and cross-record joins.

use std::collections::HashSet;
use std::fmt;

use clap::ValueEnum;
use serde_json::Value;

use super::record::{resolve, Record};

/// Manufacturer name that identifies a Mac.
const MAC_MANUFACTURER: &str = "Apple";

/// A named subset of the laptop fleet.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cohort {
    /// Every laptop that is not archived (staff and spares).
    #[default]
    Active,
    /// Active laptops that are not spares.
    Staff,
    /// Requestable spare laptops.
    #[value(alias = "spare")]
    Spares,
    /// Archived laptops.
    Archived,
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cohort::Active => "active",
            Cohort::Staff => "staff",
            Cohort::Spares => "spares",
            Cohort::Archived => "archived",
        };
        f.write_str(name)
    }
}

/// Operating system family, inferred from the laptop manufacturer.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Os {
    /// Apple hardware.
    Mac,
    /// Anything that is not Apple hardware.
    Linux,
    /// No OS filter.
    #[default]
    All,
}

impl Os {
    /// Whether a laptop's `manufacturer` object belongs to this family.
    ///
    /// A missing manufacturer never matches, even for [`Os::All`].
    pub fn matches(self, manufacturer: &Value) -> bool {
        if manufacturer.is_null() {
            return false;
        }
        let is_mac = resolve(manufacturer, "name").as_str() == Some(MAC_MANUFACTURER);
        match self {
            Os::Mac => is_mac,
            Os::Linux => !is_mac,
            Os::All => true,
        }
    }
}

/// Set each user's `laptops` field to the tags of laptops assigned to them.
///
/// Matches on `assigned_to.username == username`, keeping laptop order. Users
/// with no match get `null` rather than an empty list.
pub fn attach_assets(users: &mut [Record], laptops: &[Record]) {
    for user in users.iter_mut() {
        let username = resolve(user, "username");
        let tags: Vec<Value> = if username.is_null() {
            Vec::new()
        } else {
            laptops
                .iter()
                .filter(|laptop| resolve(laptop, "assigned_to.username") == username)
                .map(|laptop| laptop.get("asset_tag").cloned().unwrap_or(Value::Null))
                .collect()
        };

        let assigned = if tags.is_empty() {
            Value::Null
        } else {
            Value::Array(tags)
        };

        if let Value::Object(map) = user {
            map.insert("laptops".to_string(), assigned);
        }
    }
}

/// Records of `active` whose `id` does not appear in `spares`.
pub fn partition_cohort(active: &[Record], spares: &[Record]) -> Vec<Record> {
    let spare_ids: HashSet<String> = spares.iter().map(identity).collect();
    active
        .iter()
        .filter(|record| !spare_ids.contains(&identity(record)))
        .cloned()
        .collect()
}

fn identity(record: &Record) -> String {
    record.get("id").unwrap_or(&Value::Null).to_string()
}

/// Distinct manufacturer names across `models`, in first-seen order.
pub fn manufacturer_names(models: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    models
        .iter()
        .filter_map(|model| resolve(model, "manufacturer.name").as_str().map(str::to_string))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Number of laptops attached to a user by [`attach_assets`].
pub fn laptop_count(user: &Record) -> usize {
    user.get("laptops")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
