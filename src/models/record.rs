//! Schemaless records and dotted field-path resolution.

use std::cmp::Ordering;

use serde_json::Value;

/// A record as returned by the API: any JSON value, usually an object.
pub type Record = Value;

/// Separator used when a path resolves to an array.
pub const LIST_SEPARATOR: &str = ", ";

/// Resolve a dotted `path` (e.g. `assigned_to.username`) against `record`.
///
/// Never fails. A missing or null segment, or a segment that tries to step
/// into a non-object, yields `Null`. A path ending on an object also yields
/// `Null`; one ending on an array yields its elements joined with `", "`.
/// Scalars come back untouched.
///
/// ```
/// use serde_json::json;
/// use snipe_report::resolve;
///
/// let laptop = json!({"assigned_to": {"username": "alice"}});
/// assert_eq!(resolve(&laptop, "assigned_to.username"), json!("alice"));
/// assert_eq!(resolve(&laptop, "assigned_to"), json!(null));
/// ```
pub fn resolve(record: &Record, path: &str) -> Value {
    let mut value = record;
    for segment in path.split('.') {
        match value {
            Value::Object(map) => match map.get(segment) {
                Some(next) => value = next,
                None => return Value::Null,
            },
            _ => return Value::Null,
        }
    }

    match value {
        Value::Object(_) => Value::Null,
        Value::Array(items) => Value::String(join_values(items)),
        scalar => scalar.clone(),
    }
}

/// Join array elements for display.
fn join_values(items: &[Value]) -> String {
    items
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Render a value as table text: strings unquoted, null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Total order over values for sorting report rows.
///
/// `Null < Bool < Number < String < Array < Object`; within a kind values
/// compare naturally, arrays and objects by their JSON text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Truthiness used by report filters: null and `false` are false.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested_scalar() {
        let record = json!({"a": {"b": {"c": 5}}});
        assert_eq!(resolve(&record, "a.b.c"), json!(5));
    }

    #[test]
    fn test_resolve_null_intermediate() {
        let record = json!({"a": {"b": null}});
        assert_eq!(resolve(&record, "a.b.c"), Value::Null);
    }

    #[test]
    fn test_resolve_missing_key() {
        let record = json!({"a": {}});
        assert_eq!(resolve(&record, "a.b.c"), Value::Null);
        assert_eq!(resolve(&record, "z"), Value::Null);
    }

    #[test]
    fn test_resolve_through_scalar_is_null() {
        let record = json!({"name": "laptop"});
        assert_eq!(resolve(&record, "name.first"), Value::Null);
    }

    #[test]
    fn test_resolve_object_is_null() {
        let record = json!({"a": {"b": {"c": 5}}});
        assert_eq!(resolve(&record, "a.b"), Value::Null);
    }

    #[test]
    fn test_resolve_array_joins() {
        let record = json!({"a": {"b": [1, 2, 3]}});
        assert_eq!(resolve(&record, "a.b"), json!("1, 2, 3"));

        let user = json!({"laptops": ["2019061501", "2020010203"]});
        assert_eq!(resolve(&user, "laptops"), json!("2019061501, 2020010203"));
    }

    #[test]
    fn test_resolve_scalar_untransformed() {
        let record = json!({"in_warranty": true, "cost": 12.5});
        assert_eq!(resolve(&record, "in_warranty"), json!(true));
        assert_eq!(resolve(&record, "cost"), json!(12.5));
    }

    #[test]
    fn test_compare_values_orders_kinds() {
        let mut values = vec![json!("b"), json!(2), Value::Null, json!("a"), json!(1.5), json!(true)];
        values.sort_by(compare_values);
        assert_eq!(
            values,
            vec![Value::Null, json!(true), json!(1.5), json!(2), json!("a"), json!("b")]
        );
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!("x")), "x");
        assert_eq!(display_value(&json!(3)), "3");
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!(0)));
        assert!(is_truthy(&json!("")));
    }
}
