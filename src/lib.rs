//! Snipe-IT inventory reports.
//!
//! A Rust library and CLI that pulls hardware, user, model, manufacturer and
//! status-label records out of a Snipe-IT instance, cross-references them,
//! and renders them as tables.
//!
//! # Quick Start
//!
//! ```no_run
//! use snipe_report::{Cohort, Config, Inventory, Reporter, SnipeClient};
//!
//! #[tokio::main]
//! async fn main() -> snipe_report::Result<()> {
//!     // Reads the API key from /secrets/api_key.txt
//!     let config = Config::default();
//!     let client = SnipeClient::from_config(&config)?;
//!
//!     let reporter = Reporter::new(Inventory::from_transport(client));
//!     let report = reporter.laptops(Cohort::Spares).await?;
//!     println!("{} spare laptops", report.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`QueryAggregator`] - Follows offset pagination until an empty page and
//!   returns the merged rows
//! - [`Inventory`] - Named resource listings, each fetched at most once per
//!   process through a [`RecordCache`]
//! - [`resolve`] - Dotted field-path lookup over schemaless records
//! - [`ReportBuilder`] - Sorts a collection and projects field paths into rows
//! - [`Reporter`] - The named reports built from the pieces above
//!
//! Network access goes through the [`Transport`] trait, implemented by
//! [`SnipeClient`].
//!
//! # Configuration
//!
//! - `SNIPE_BASE_URL` (optional) - Web root (defaults to `https://snipeit.app.eff.org/`)
//! - `SNIPE_API_URL` (optional) - API root (defaults to `<base>api/v1/`)
//! - `SNIPE_API_KEY_FILE` (optional) - API key file (defaults to `/secrets/api_key.txt`)

mod cache;
mod client;
mod config;
mod error;
mod inventory;
mod models;
mod output;
mod pagination;
mod query;
mod report;
mod traits;

pub mod cli;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use cache::{CacheKey, Collection, RecordCache};
pub use client::SnipeClient;
pub use config::{load_api_key, Config, DEFAULT_API_KEY_FILE, DEFAULT_BASE_URL};
pub use error::{Result, SnipeError};
pub use inventory::{Inventory, LAPTOP_CATEGORY_ID, LAPTOP_CATEGORY_NAME};
pub use pagination::{OffsetParams, Page, PageResponse};
pub use query::{Fetched, Filter, QueryAggregator, TrailingPageFailure, MAX_PAGES};

// Re-export traits
pub use output::{render_table, Printer, TablePrinter};
pub use traits::Transport;

// Re-export models
pub use models::{
    // Records
    compare_values,
    display_value,
    is_truthy,
    resolve,
    Record,
    LIST_SEPARATOR,
    // Asset tags
    age_in_years,
    age_in_years_on,
    classify_asset_tag,
    estimate_sale_price,
    parse_purchase_cost,
    purchase_date,
    AssetTagKind,
    DEPRECIATION_YEARS,
    // Cohorts
    attach_assets,
    laptop_count,
    manufacturer_names,
    partition_cohort,
    Cohort,
    Os,
};

// Re-export reports
pub use report::{project_rows, LaptopInfo, Report, ReportBuilder, ReportRow, Reporter};
