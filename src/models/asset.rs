//! Asset tag classification, age and depreciation.
//!
//! Tags come in three generations: word tags for the oldest machines
//! (`oldspare03`), small sequence numbers (`000000042`), and the current
//! scheme that starts with the purchase date (`20190615`, `2019061501`).

use std::fmt;

use chrono::{Local, NaiveDate};
use serde_json::Value;

/// Years over which purchase cost is written down to zero.
pub const DEPRECIATION_YEARS: f64 = 4.0;

/// Tags below this value are sequence numbers rather than dates.
const INCREMENTAL_LIMIT: i64 = 100;

/// The generation an asset tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetTagKind {
    WordBased,
    Incremental,
    DateBased,
}

impl fmt::Display for AssetTagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetTagKind::WordBased => write!(f, "word-based"),
            AssetTagKind::Incremental => write!(f, "incremental"),
            AssetTagKind::DateBased => write!(f, "date-based"),
        }
    }
}

/// Classify a tag by the integer formed from its leading digits.
///
/// An optional `+` or `-` sign before the digits counts. No leading digits
/// (or only zeros) is word-based, anything below 100, negatives included, is
/// incremental, and everything else is date-based.
pub fn classify_asset_tag(tag: &str) -> AssetTagKind {
    match leading_integer(tag) {
        0 => AssetTagKind::WordBased,
        n if n < INCREMENTAL_LIMIT => AssetTagKind::Incremental,
        _ => AssetTagKind::DateBased,
    }
}

/// Signed integer value of the leading ASCII digits, saturating on overflow.
fn leading_integer(tag: &str) -> i64 {
    let tag = tag.trim_start();
    let (negative, digits) = match tag.as_bytes().first() {
        Some(b'-') => (true, &tag[1..]),
        Some(b'+') => (false, &tag[1..]),
        _ => (false, tag),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Purchase date encoded in a date-based tag.
///
/// Accepts `YYYYMMDD`, `YYYY-MM-DD` and `YYYY/MM/DD`; a longer all-digit tag
/// uses its first eight digits (`2019061501` is the first asset bought on
/// 2019-06-15).
pub fn purchase_date(tag: &str) -> Option<NaiveDate> {
    if classify_asset_tag(tag) != AssetTagKind::DateBased {
        return None;
    }

    let tag = tag.trim();
    for format in ["%Y%m%d", "%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(tag, format) {
            return Some(date);
        }
    }

    if tag.len() > 8 && tag.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&tag[..8], "%Y%m%d").ok();
    }

    None
}

/// Approximate age in years of a date-based asset, as of today.
pub fn age_in_years(tag: &str) -> Option<f64> {
    age_in_years_on(tag, Local::now().date_naive())
}

/// Approximate age in years as of `today`, rounded to three decimals.
///
/// Uses 365-day years; leap days are not accounted for.
pub fn age_in_years_on(tag: &str, today: NaiveDate) -> Option<f64> {
    let purchased = purchase_date(tag)?;
    let days = (today - purchased).num_days() as f64;
    Some(round3(days / 365.0))
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Linear depreciation of `purchase_cost` over [`DEPRECIATION_YEARS`].
pub fn estimate_sale_price(purchase_cost: Option<f64>, age: Option<f64>) -> Option<f64> {
    let cost = purchase_cost?;
    let age = age?;
    Some(cost * (1.0 - age.min(DEPRECIATION_YEARS) / DEPRECIATION_YEARS))
}

/// Whole-unit purchase cost from a number or a string like `"1,299.00"`.
pub fn parse_purchase_cost(value: &Value) -> Option<f64> {
    let cost = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    Some(cost.trunc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_asset_tag() {
        assert_eq!(classify_asset_tag("oldspare03"), AssetTagKind::WordBased);
        assert_eq!(classify_asset_tag("42"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag("000000007"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag("20190615"), AssetTagKind::DateBased);
        assert_eq!(classify_asset_tag("2019-06-15"), AssetTagKind::DateBased);
        assert_eq!(classify_asset_tag(""), AssetTagKind::WordBased);
        assert_eq!(classify_asset_tag("0"), AssetTagKind::WordBased);
        assert_eq!(classify_asset_tag("99"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag("100"), AssetTagKind::DateBased);
    }

    #[test]
    fn test_classify_signed_tags() {
        assert_eq!(classify_asset_tag("+42"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag("-5"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag(" -20190615"), AssetTagKind::Incremental);
        assert_eq!(classify_asset_tag("+0"), AssetTagKind::WordBased);
        assert_eq!(classify_asset_tag("-"), AssetTagKind::WordBased);
        assert_eq!(classify_asset_tag("+20190615"), AssetTagKind::DateBased);
        assert_eq!(age_in_years_on("-5", date(2021, 6, 14)), None);
    }

    #[test]
    fn test_purchase_date_formats() {
        assert_eq!(purchase_date("20190615"), Some(date(2019, 6, 15)));
        assert_eq!(purchase_date("2019-06-15"), Some(date(2019, 6, 15)));
        assert_eq!(purchase_date("2019061503"), Some(date(2019, 6, 15)));
        assert_eq!(purchase_date("oldspare03"), None);
        assert_eq!(purchase_date("12345"), None);
    }

    #[test]
    fn test_age_in_years_on() {
        let today = date(2021, 6, 14);
        // 730 days
        assert_eq!(age_in_years_on("20190615", today), Some(2.0));
        assert_eq!(age_in_years_on("20210614", today), Some(0.0));
        assert_eq!(age_in_years_on("oldspare03", today), None);
        assert_eq!(age_in_years_on("42", today), None);
    }

    #[test]
    fn test_age_rounds_to_three_decimals() {
        let age = age_in_years_on("20200101", date(2020, 1, 2)).unwrap();
        assert_eq!(age, 0.003);
    }

    #[test]
    fn test_age_in_years_non_negative_for_past_dates() {
        let age = age_in_years("20150101").unwrap();
        assert!(age > 0.0);
    }

    #[test]
    fn test_estimate_sale_price() {
        assert_eq!(estimate_sale_price(Some(1000.0), Some(2.0)), Some(500.0));
        assert_eq!(estimate_sale_price(Some(1000.0), Some(10.0)), Some(0.0));
        assert_eq!(estimate_sale_price(None, Some(1.0)), None);
        assert_eq!(estimate_sale_price(Some(1000.0), None), None);
    }

    #[test]
    fn test_parse_purchase_cost() {
        assert_eq!(parse_purchase_cost(&json!("1,299.99")), Some(1299.0));
        assert_eq!(parse_purchase_cost(&json!(1000)), Some(1000.0));
        assert_eq!(parse_purchase_cost(&json!(null)), None);
        assert_eq!(parse_purchase_cost(&json!("n/a")), None);
    }
}
