//! Record model and the derivations built on it.

pub(crate) mod asset;
pub(crate) mod cohort;
pub(crate) mod record;

pub use asset::{
    age_in_years, age_in_years_on, classify_asset_tag, estimate_sale_price, parse_purchase_cost,
    purchase_date, AssetTagKind, DEPRECIATION_YEARS,
};
pub use cohort::{attach_assets, laptop_count, manufacturer_names, partition_cohort, Cohort, Os};
pub use record::{compare_values, display_value, is_truthy, resolve, Record, LIST_SEPARATOR};
