//! Laptop fleet reports.

use serde_json::Value;

use super::{Report, ReportBuilder, ReportRow, Reporter};
use crate::error::Result;
use crate::models::{
    age_in_years_on, classify_asset_tag, display_value, estimate_sale_price, is_truthy,
    parse_purchase_cost, purchase_date, resolve, AssetTagKind, Cohort, Record,
};
use crate::traits::Transport;

const LAPTOP_FIELDS: [&str; 4] = ["asset_tag", "serial", "name", "assigned_to.username"];
const LAPTOP_HEADINGS: [&str; 4] = ["Asset Tag", "Serial", "Asset Name", "Assigned To"];

/// Placeholder for the date columns of assets without a purchase date.
const NO_DATE: &str = "---";

/// Status values that name a status type rather than a status label.
const STATUS_TYPES: [&str; 3] = ["pending", "archived", "deployable"];

/// Fields left out of the single-laptop detail view.
const IGNORED_FIELDS: [&str; 21] = [
    "available_actions",
    "category",
    "checkin_counter",
    "checkout_counter",
    "company",
    "created_at",
    "custom_fields",
    "deleted_at",
    "eol",
    "expected_checkin",
    "image",
    "last_audit_date",
    "location",
    "last_checkout",
    "model_number",
    "next_audit_date",
    "requests_counter",
    "rtd_location",
    "supplier",
    "updated_at",
    "warranty_months",
];

/// Nested objects shown by their `name`.
const NAME_FIELDS: [&str; 3] = ["model", "status_label", "manufacturer"];

/// Nested date objects shown by their `formatted` text.
const DATE_FIELDS: [&str; 3] = ["updated_at", "warranty_expires", "purchase_date"];

/// Detail view of one laptop plus the id used to link to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LaptopInfo {
    pub report: Report,
    pub asset_id: Option<String>,
}

impl<T: Transport> Reporter<T> {
    /// All laptops in a cohort, by asset tag.
    pub async fn laptops(&self, cohort: Cohort) -> Result<Report> {
        let laptops = self.inventory.laptops(cohort).await?;
        Ok(laptop_table().build(&laptops))
    }

    /// Laptops still under warranty, soonest expiry first.
    pub async fn laptops_in_warranty(&self, cohort: Cohort) -> Result<Report> {
        let laptops = self.inventory.laptops(cohort).await?;
        let in_warranty: Vec<Record> = laptops
            .iter()
            .filter(|laptop| is_truthy(&resolve(laptop, "in_warranty")))
            .cloned()
            .collect();

        let mut fields = vec!["warranty_expires.formatted"];
        fields.extend(LAPTOP_FIELDS);
        let mut headings = vec!["Warranty Expires"];
        headings.extend(LAPTOP_HEADINGS);

        Ok(ReportBuilder::new(&fields)
            .sort_by("warranty_expires.formatted")
            .headings(&headings)
            .build(&in_warranty))
    }

    /// Laptops grouped by tag generation, with approximate ages.
    ///
    /// With `older_than_years == 0.0` word-based and incremental tags are
    /// listed first (they carry no date). Otherwise only date-based tags at
    /// least that old are shown.
    pub async fn laptops_by_age(&self, cohort: Cohort, older_than_years: f64) -> Result<Report> {
        let laptops = self.inventory.laptops(cohort).await?;
        let mut rows = Vec::new();

        if older_than_years == 0.0 {
            for kind in [AssetTagKind::WordBased, AssetTagKind::Incremental] {
                for laptop in sorted_by_tag(&laptops, kind) {
                    rows.push(age_row(laptop, Value::from(NO_DATE), Value::from(NO_DATE)));
                }
            }
        }

        for laptop in sorted_by_tag(&laptops, AssetTagKind::DateBased) {
            let tag = asset_tag(laptop);
            let age = age_in_years_on(&tag, self.today);
            if older_than_years != 0.0 && age.map_or(true, |age| age < older_than_years) {
                continue;
            }

            let purchased = purchase_date(&tag)
                .map_or(Value::Null, |date| Value::from(date.format("%Y-%m-%d").to_string()));
            rows.push(age_row(laptop, purchased, age.map_or(Value::Null, Value::from)));
        }

        Ok(Report::new(
            &["Purchase Date", "Approx Age", "Asset Tag", "Serial", "Asset Name"],
            rows,
        ))
    }

    /// Laptops filtered by status label name or status type.
    ///
    /// `pending`, `archived` and `deployable` match `status_label.status_type`;
    /// anything else matches `status_label.name`.
    pub async fn laptops_by_status(&self, cohort: Cohort, status: Option<&str>) -> Result<Report> {
        let laptops = self.inventory.laptops(cohort).await?;

        let status_field = match status {
            Some(s) if STATUS_TYPES.contains(&s) => "status_type",
            _ => "name",
        };
        let status_path = format!("status_label.{status_field}");

        let matching: Vec<Record> = laptops
            .iter()
            .filter(|laptop| {
                status.map_or(true, |s| resolve(laptop, &status_path).as_str() == Some(s))
            })
            .cloned()
            .collect();

        let mut fields = vec![status_path.as_str()];
        fields.extend(LAPTOP_FIELDS);
        let mut headings = vec!["Status"];
        headings.extend(LAPTOP_HEADINGS);

        Ok(ReportBuilder::new(&fields)
            .sort_by(status_path.as_str())
            .headings(&headings)
            .build(&matching))
    }

    /// Estimated resale price of one laptop from its age and purchase cost.
    pub async fn laptop_sale_price(&self, asset_tag: &str) -> Result<Report> {
        let laptop = self.inventory.get_laptop(asset_tag).await?;
        let age = age_in_years_on(asset_tag, self.today);
        let cost = laptop.get("purchase_cost").unwrap_or(&Value::Null);
        let price = estimate_sale_price(parse_purchase_cost(cost), age);

        let row = vec![
            price.map_or(Value::Null, Value::from),
            age.map_or(Value::Null, Value::from),
            cost.clone(),
            resolve(&laptop, "asset_tag"),
            resolve(&laptop, "serial"),
            resolve(&laptop, "name"),
        ];

        Ok(Report::new(
            &["Est Price", "Approx Age", "Purchase Cost", "Asset Tag", "Serial", "Asset Name"],
            vec![row],
        ))
    }

    /// Attribute/value listing of one laptop.
    pub async fn laptop_info(&self, asset_tag: &str) -> Result<LaptopInfo> {
        let laptop = self.inventory.get_laptop(asset_tag).await?;

        let mut rows: Vec<ReportRow> = Vec::new();
        if let Value::Object(fields) = &laptop {
            for (key, value) in fields {
                let key = key.as_str();
                if IGNORED_FIELDS.contains(&key) {
                    continue;
                }

                let shown = if NAME_FIELDS.contains(&key) {
                    resolve(value, "name")
                } else if DATE_FIELDS.contains(&key) {
                    resolve(value, "formatted")
                } else if key == "assigned_to" {
                    if value.is_null() {
                        continue;
                    }
                    resolve(value, "username")
                } else {
                    value.clone()
                };

                rows.push(vec![Value::from(key), shown]);
            }
        }

        let asset_id = laptop
            .get("id")
            .filter(|id| !id.is_null())
            .map(display_value);

        Ok(LaptopInfo {
            report: Report::new(&["Attribute", "Value"], rows),
            asset_id,
        })
    }

    /// One laptop table per manufacturer that has laptops in the cohort.
    pub async fn laptops_by_manufacturer(&self, cohort: Cohort) -> Result<Vec<Report>> {
        let manufacturers = self.inventory.laptop_manufacturers().await?;
        let laptops = self.inventory.laptops(cohort).await?;

        let reports = manufacturers
            .into_iter()
            .filter_map(|manufacturer| {
                let set: Vec<Record> = laptops
                    .iter()
                    .filter(|laptop| {
                        resolve(laptop, "manufacturer.name").as_str() == Some(manufacturer.as_str())
                    })
                    .cloned()
                    .collect();

                (!set.is_empty()).then(|| laptop_table().title(manufacturer).build(&set))
            })
            .collect();

        Ok(reports)
    }
}

fn laptop_table() -> ReportBuilder {
    ReportBuilder::new(&LAPTOP_FIELDS)
        .sort_by("asset_tag")
        .headings(&LAPTOP_HEADINGS)
}

fn asset_tag(laptop: &Record) -> String {
    display_value(&resolve(laptop, "asset_tag"))
}

/// Laptops of one tag generation, sorted by tag.
fn sorted_by_tag(laptops: &[Record], kind: AssetTagKind) -> Vec<&Record> {
    let mut matching: Vec<&Record> = laptops
        .iter()
        .filter(|laptop| classify_asset_tag(&asset_tag(laptop)) == kind)
        .collect();
    matching.sort_by_key(|laptop| asset_tag(laptop));
    matching
}

fn age_row(laptop: &Record, purchased: Value, age: Value) -> ReportRow {
    vec![
        purchased,
        age,
        resolve(laptop, "asset_tag"),
        resolve(laptop, "serial"),
        resolve(laptop, "name"),
    ]
}
