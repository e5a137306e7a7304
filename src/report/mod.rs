//! Tabular reports over inventory records.
//!
//! [`ReportBuilder`] is the generic projection: sort a collection by one
//! field path, then pull an ordered list of field paths out of every record.
//! [`Reporter`] composes it with [`Inventory`] into the named reports the CLI
//! exposes; those live in the submodules by subject.

mod catalog;
mod laptops;
mod users;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::inventory::Inventory;
use crate::models::{compare_values, resolve, Record};
use crate::traits::Transport;

pub use laptops::LaptopInfo;

/// One table row: cell values aligned with [`Report::headings`].
pub type ReportRow = Vec<Value>;

/// A titled table ready for a [`Printer`](crate::Printer).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub headings: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new<S: AsRef<str>>(headings: &[S], rows: Vec<ReportRow>) -> Self {
        Self {
            title: None,
            headings: headings.iter().map(|h| h.as_ref().to_string()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the column with the given heading.
    pub fn column(&self, heading: &str) -> Option<Vec<&Value>> {
        let index = self.headings.iter().position(|h| h == heading)?;
        Some(self.rows.iter().map(|row| row.get(index).unwrap_or(&Value::Null)).collect())
    }

    /// Rows as JSON objects keyed by heading.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .headings
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(rows)
    }

    /// JSON form for output: the rows array, or `{"title", "rows"}` when the
    /// report has a title.
    pub fn to_json_document(&self) -> Value {
        match &self.title {
            Some(title) => serde_json::json!({ "title": title, "rows": self.to_json() }),
            None => self.to_json(),
        }
    }
}

/// Sort `records` by `sort` (if any) and project each through `fields`.
///
/// The sort is stable and uses [`compare_values`] on the resolved key, so
/// rows with equal or missing keys keep their collection order.
pub fn project_rows<S: AsRef<str>>(
    records: &[Record],
    fields: &[S],
    sort: Option<&str>,
) -> Vec<ReportRow> {
    let mut ordered: Vec<(Value, &Record)> = records
        .iter()
        .map(|record| (sort.map_or(Value::Null, |path| resolve(record, path)), record))
        .collect();

    if sort.is_some() {
        ordered.sort_by(|(a, _), (b, _)| compare_values(a, b));
    }

    ordered
        .into_iter()
        .map(|(_, record)| {
            fields
                .iter()
                .map(|field| resolve(record, field.as_ref()))
                .collect()
        })
        .collect()
}

/// Declarative description of a projected report.
///
/// ```
/// use serde_json::json;
/// use snipe_report::ReportBuilder;
///
/// let laptops = vec![
///     json!({"asset_tag": "B", "assigned_to": {"username": "bob"}}),
///     json!({"asset_tag": "A", "assigned_to": null}),
/// ];
/// let report = ReportBuilder::new(&["asset_tag", "assigned_to.username"])
///     .sort_by("asset_tag")
///     .headings(&["Asset Tag", "Assigned To"])
///     .build(&laptops);
/// assert_eq!(report.rows[0], vec![json!("A"), json!(null)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    fields: Vec<String>,
    sort: Option<String>,
    headings: Vec<String>,
    title: Option<String>,
}

impl ReportBuilder {
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Sort rows ascending by this field path.
    #[must_use]
    pub fn sort_by(mut self, path: impl Into<String>) -> Self {
        self.sort = Some(path.into());
        self
    }

    /// Column headings; the field paths are used when none are given.
    #[must_use]
    pub fn headings<S: AsRef<str>>(mut self, headings: &[S]) -> Self {
        self.headings = headings.iter().map(|h| h.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn build(&self, records: &[Record]) -> Report {
        let headings = if self.headings.is_empty() {
            self.fields.clone()
        } else {
            self.headings.clone()
        };

        Report {
            title: self.title.clone(),
            headings,
            rows: project_rows(records, &self.fields, self.sort.as_deref()),
        }
    }
}

/// Named reports over an [`Inventory`].
///
/// Ages are computed against [`Reporter::today`], which defaults to the local
/// date at construction.
#[derive(Debug)]
pub struct Reporter<T> {
    inventory: Inventory<T>,
    today: NaiveDate,
}

impl<T: Transport> Reporter<T> {
    pub fn new(inventory: Inventory<T>) -> Self {
        Self {
            inventory,
            today: Local::now().date_naive(),
        }
    }

    /// Compute ages as of `today` instead of the current date.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn inventory(&self) -> &Inventory<T> {
        &self.inventory
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}
