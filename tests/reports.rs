//! Report tests over an in-memory transport.
//!
//! The transport serves canned listings in a single page and counts requests
//! per resource, so cross-referencing and caching can be checked without HTTP.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use snipe_report::cli::{run, Command};
use snipe_report::{Cohort, Inventory, Os, Reporter, SnipeError, TablePrinter, Transport};
use url::Url;

/// Serves `{"rows": [...]}` for known resources and an empty page after it.
#[derive(Default)]
struct FakeSnipe {
    listings: HashMap<String, Vec<Value>>,
    entities: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl FakeSnipe {
    fn with_listing(mut self, key: &str, rows: Vec<Value>) -> Self {
        self.listings.insert(key.to_string(), rows);
        self
    }

    fn with_entity(mut self, path: &str, body: Value) -> Self {
        self.entities.insert(path.to_string(), body);
        self
    }

    fn first_page_requests(&self, key: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.as_str() == key)
            .count()
    }
}

/// Listing key: the path plus a `status` filter when present.
fn listing_key(path: &str, query: &[(String, String)]) -> String {
    match query.iter().find(|(k, _)| k == "status") {
        Some((_, status)) => format!("{path}?status={status}"),
        None => path.to_string(),
    }
}

#[async_trait]
impl Transport for FakeSnipe {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> snipe_report::Result<Value> {
        if let Some(body) = self.entities.get(path) {
            return Ok(body.clone());
        }

        let key = listing_key(path, query);
        let continuation = query.iter().any(|(k, _)| k == "offset");
        if !continuation {
            self.requests.lock().unwrap().push(key.clone());
        }

        let rows = match (self.listings.get(&key), continuation) {
            (Some(rows), false) => rows.clone(),
            (Some(_), true) => Vec::new(),
            (None, _) => {
                return Err(SnipeError::ApiError {
                    message: format!("no listing for {key}"),
                    status_code: Some(404),
                })
            }
        };
        Ok(json!({ "total": rows.len(), "rows": rows }))
    }
}

fn laptop(id: u64, tag: &str, manufacturer: &str, status: &str, assigned_to: Option<&str>) -> Value {
    let status_type = if status == "Pending" { "pending" } else { "deployable" };
    json!({
        "id": id,
        "asset_tag": tag,
        "serial": format!("SN{id}"),
        "name": format!("laptop-{id}"),
        "manufacturer": { "name": manufacturer },
        "model": { "name": format!("{manufacturer} model") },
        "status_label": { "name": status, "status_type": status_type },
        "assigned_to": assigned_to.map(|u| json!({ "username": u })),
        "in_warranty": id % 2 == 0,
        "warranty_expires": { "formatted": format!("2027-01-{id:02}") },
        "purchase_cost": "1,000.00"
    })
}

fn fleet() -> FakeSnipe {
    let active = vec![
        laptop(1, "2019061501", "Apple", "Ready to Deploy", Some("alice")),
        laptop(2, "2021030201", "Lenovo", "Ready to Deploy", Some("bob")),
        laptop(3, "2022110701", "Lenovo", "Pending", Some("alice")),
        laptop(4, "oldspare03", "Lenovo", "Requestable", None),
        laptop(5, "000000042", "Apple", "Requestable", None),
    ];
    let spares = vec![active[3].clone(), active[4].clone()];

    FakeSnipe::default()
        .with_listing("hardware", active)
        .with_listing("hardware?status=Requestable", spares)
        .with_listing(
            "hardware?status=Archived",
            vec![laptop(6, "2016010101", "Lenovo", "Archived", None)],
        )
        .with_listing(
            "users",
            vec![
                json!({ "id": 101, "username": "alice" }),
                json!({ "id": 102, "username": "bob" }),
                json!({ "id": 103, "username": "carol" }),
            ],
        )
        .with_listing(
            "models",
            vec![
                json!({ "id": 1, "name": "MacBook Pro", "manufacturer": { "name": "Apple" }, "category": { "name": "Laptop" }, "assets_count": 2 }),
                json!({ "id": 2, "name": "ThinkPad", "manufacturer": { "name": "Lenovo" }, "category": { "name": "Laptop" }, "assets_count": 4 }),
                json!({ "id": 3, "name": "UltraSharp", "manufacturer": { "name": "Dell" }, "category": { "name": "Monitor" }, "assets_count": 1 }),
            ],
        )
        .with_listing(
            "manufacturers",
            vec![
                json!({ "id": 2, "name": "Lenovo", "assets_count": 4 }),
                json!({ "id": 1, "name": "Apple", "assets_count": 2 }),
            ],
        )
        .with_listing(
            "statuslabels",
            vec![
                json!({ "id": 3, "name": "Pending", "type": "pending" }),
                json!({ "id": 1, "name": "Ready to Deploy", "type": "deployable" }),
                json!({ "id": 4, "name": "Archived", "type": "archived" }),
            ],
        )
        .with_entity(
            "hardware/bytag/2019061501",
            laptop(1, "2019061501", "Apple", "Ready to Deploy", Some("alice")),
        )
        .with_entity(
            "hardware/bytag/missing",
            json!({ "status": "error", "messages": "Asset does not exist.", "payload": null }),
        )
}

fn reporter(transport: FakeSnipe) -> Reporter<FakeSnipe> {
    let today = NaiveDate::from_ymd_opt(2021, 6, 14).unwrap();
    Reporter::new(Inventory::from_transport(transport)).with_today(today)
}

fn strings(values: Vec<&Value>) -> Vec<String> {
    values.into_iter().map(|v| v.as_str().unwrap_or_default().to_string()).collect()
}

// =============================================================================
// Laptops
// =============================================================================

#[tokio::test]
async fn test_laptops_sorted_by_tag() {
    let reporter = reporter(fleet());
    let report = reporter.laptops(Cohort::Active).await.unwrap();

    assert_eq!(report.headings, vec!["Asset Tag", "Serial", "Asset Name", "Assigned To"]);
    assert_eq!(
        strings(report.column("Asset Tag").unwrap()),
        vec!["000000042", "2019061501", "2021030201", "2022110701", "oldspare03"]
    );
    // unassigned laptops show null, not an error
    assert_eq!(report.rows[0][3], Value::Null);
}

#[tokio::test]
async fn test_staff_is_active_minus_spares() {
    let reporter = reporter(fleet());
    let report = reporter.laptops(Cohort::Staff).await.unwrap();

    assert_eq!(
        strings(report.column("Asset Tag").unwrap()),
        vec!["2019061501", "2021030201", "2022110701"]
    );
}

#[tokio::test]
async fn test_laptops_in_warranty() {
    let reporter = reporter(fleet());
    let report = reporter.laptops_in_warranty(Cohort::Active).await.unwrap();

    assert_eq!(report.headings[0], "Warranty Expires");
    assert_eq!(
        strings(report.column("Asset Tag").unwrap()),
        vec!["2021030201", "oldspare03"]
    );
}

#[tokio::test]
async fn test_laptops_by_age_lists_undated_tags_first() {
    let reporter = reporter(fleet());
    let report = reporter.laptops_by_age(Cohort::Active, 0.0).await.unwrap();

    assert_eq!(
        strings(report.column("Asset Tag").unwrap()),
        vec!["oldspare03", "000000042", "2019061501", "2021030201", "2022110701"]
    );
    assert_eq!(report.rows[0][0], json!("---"));
    assert_eq!(report.rows[2][0], json!("2019-06-15"));
    assert_eq!(report.rows[2][1], json!(2.0));
}

#[tokio::test]
async fn test_laptops_by_age_threshold() {
    let reporter = reporter(fleet());
    let report = reporter.laptops_by_age(Cohort::Active, 1.0).await.unwrap();

    assert_eq!(strings(report.column("Asset Tag").unwrap()), vec!["2019061501"]);
}

#[tokio::test]
async fn test_laptops_by_status_type_and_name() {
    let reporter = reporter(fleet());

    let pending = reporter
        .laptops_by_status(Cohort::Active, Some("pending"))
        .await
        .unwrap();
    assert_eq!(strings(pending.column("Asset Tag").unwrap()), vec!["2022110701"]);

    let requestable = reporter
        .laptops_by_status(Cohort::Active, Some("Requestable"))
        .await
        .unwrap();
    assert_eq!(requestable.len(), 2);

    let all = reporter.laptops_by_status(Cohort::Active, None).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn test_laptops_by_manufacturer() {
    let reporter = reporter(fleet());
    let reports = reporter.laptops_by_manufacturer(Cohort::Staff).await.unwrap();

    let titles: Vec<_> = reports.iter().map(|r| r.title.clone().unwrap()).collect();
    assert_eq!(titles, vec!["Apple", "Lenovo"]);
    assert_eq!(reports[0].len(), 1);
    assert_eq!(reports[1].len(), 2);
}

#[tokio::test]
async fn test_laptop_sale_price() {
    let reporter = reporter(fleet());
    let report = reporter.laptop_sale_price("2019061501").await.unwrap();

    assert_eq!(report.len(), 1);
    // 1000 purchase cost, two years into four of depreciation
    assert_eq!(report.rows[0][0], json!(500.0));
    assert_eq!(report.rows[0][1], json!(2.0));
    assert_eq!(report.rows[0][2], json!("1,000.00"));
}

#[tokio::test]
async fn test_laptop_info_hides_noise_and_flattens_objects() {
    let reporter = reporter(fleet());
    let info = reporter.laptop_info("2019061501").await.unwrap();

    assert_eq!(info.asset_id.as_deref(), Some("1"));
    assert_eq!(info.report.headings, vec!["Attribute", "Value"]);

    let lookup = |name: &str| {
        info.report
            .rows
            .iter()
            .find(|row| row[0] == json!(name))
            .map(|row| row[1].clone())
    };
    assert_eq!(lookup("manufacturer"), Some(json!("Apple")));
    assert_eq!(lookup("assigned_to"), Some(json!("alice")));
    assert_eq!(lookup("warranty_expires"), Some(json!("2027-01-01")));
    assert_eq!(lookup("asset_tag"), Some(json!("2019061501")));
}

#[tokio::test]
async fn test_unknown_tag_is_not_found() {
    let reporter = reporter(fleet());
    let err = reporter.laptop_info("missing").await.unwrap_err();

    assert!(matches!(err, SnipeError::NotFound { entity_type: "Asset", .. }));
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_users_have_attached_laptops() {
    let reporter = reporter(fleet());
    let report = reporter.users().await.unwrap();

    assert_eq!(report.headings, vec!["ID", "Username", "Laptops"]);
    assert_eq!(report.rows[0], vec![json!(101), json!("alice"), json!("2019061501, 2022110701")]);
    assert_eq!(report.rows[2], vec![json!(103), json!("carol"), Value::Null]);
}

#[tokio::test]
async fn test_users_with_no_and_multiple_assets() {
    let reporter = reporter(fleet());

    let none = reporter.users_with_no_assets().await.unwrap();
    assert_eq!(strings(none.column("Username").unwrap()), vec!["carol"]);

    let multiple = reporter.users_with_multiple_assets().await.unwrap();
    assert_eq!(strings(multiple.column("Username").unwrap()), vec!["alice"]);
}

#[tokio::test]
async fn test_users_by_os() {
    let reporter = reporter(fleet());

    let mac = reporter.users_by_os(Cohort::Active, Os::Mac).await.unwrap();
    assert_eq!(strings(mac.column("Asset Tag").unwrap()), vec!["2019061501"]);

    let linux = reporter.users_by_os(Cohort::Active, Os::Linux).await.unwrap();
    assert_eq!(strings(linux.column("Assigned To").unwrap()), vec!["alice", "bob"]);

    // spares are never assigned
    let all = reporter.users_by_os(Cohort::Spares, Os::All).await.unwrap();
    assert!(all.is_empty());
}

// =============================================================================
// Reference data
// =============================================================================

#[tokio::test]
async fn test_catalog_reports() {
    let reporter = reporter(fleet());

    let statuses = reporter.statuses().await.unwrap();
    assert_eq!(
        strings(statuses.column("Type").unwrap()),
        vec!["archived", "deployable", "pending"]
    );

    let models = reporter.models().await.unwrap();
    assert_eq!(
        strings(models.column("Manufacturer").unwrap()),
        vec!["Apple", "Dell", "Lenovo"]
    );

    let laptop_models = reporter.laptop_models().await.unwrap();
    assert_eq!(laptop_models.len(), 2);

    let manufacturers = reporter.manufacturers().await.unwrap();
    assert_eq!(strings(manufacturers.column("Name").unwrap()), vec!["Apple", "Lenovo"]);
    assert_eq!(manufacturers.headings, vec!["ID", "Name", "Num_Assets"]);
}

// =============================================================================
// Output
// =============================================================================

#[tokio::test]
async fn test_grouped_report_is_one_json_document() {
    let reporter = reporter(fleet());
    let base_url = Url::parse("https://snipe.example.org/").unwrap();
    let mut printer = TablePrinter::new(Vec::new(), base_url, true);

    run(
        &reporter,
        &Command::LaptopsByManufacturer {
            fleet: Cohort::Active,
        },
        &mut printer,
    )
    .await
    .unwrap();

    let output = String::from_utf8(printer.into_inner()).unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();
    let groups = json.as_array().unwrap();

    let titles: Vec<_> = groups.iter().map(|g| g["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Apple"), json!("Lenovo")]);
    assert_eq!(groups[0]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(groups[1]["rows"][0]["Asset Tag"], "2021030201");
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_each_listing_is_fetched_once() {
    let reporter = reporter(fleet());

    reporter.laptops(Cohort::Active).await.unwrap();
    reporter.laptops(Cohort::Staff).await.unwrap();
    reporter.users().await.unwrap();
    reporter.users_with_no_assets().await.unwrap();
    reporter.users_by_os(Cohort::Active, Os::Mac).await.unwrap();
    reporter.models().await.unwrap();
    reporter.laptop_models().await.unwrap();
    reporter.laptops_by_manufacturer(Cohort::Active).await.unwrap();

    let transport = reporter.inventory().aggregator().transport();
    assert_eq!(transport.first_page_requests("hardware"), 1);
    assert_eq!(transport.first_page_requests("hardware?status=Requestable"), 1);
    assert_eq!(transport.first_page_requests("users"), 1);
    assert_eq!(transport.first_page_requests("models"), 1);
}

#[tokio::test]
async fn test_concurrent_reports_share_one_fetch() {
    let reporter = reporter(fleet());

    let (a, b, c) = tokio::join!(
        reporter.laptops(Cohort::Active),
        reporter.laptops_in_warranty(Cohort::Active),
        reporter.users(),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    let transport = reporter.inventory().aggregator().transport();
    assert_eq!(transport.first_page_requests("hardware"), 1);
}
