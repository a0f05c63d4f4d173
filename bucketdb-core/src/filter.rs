//! Equality-based filter evaluation for query results.
//!
//! This is the minimal, bundled matching utility used by
//! [`RecordStore::query`](crate::store::RecordStore::query). It supports
//! strict structural equality only: no ranges, no regex, no negation.

use serde_json::{Map, Number, Value};

/// Decides whether `record` matches `filter`.
///
/// A record matches if, for every field present in the filter, the record
/// has that field and the two values are deeply equal. Fields absent from
/// the filter are unconstrained; an empty filter matches every record.
/// A record that is not a JSON object matches nothing.
///
/// Equality rules: numbers compare numerically (`1 == 1.0`), strings
/// exactly, objects recursively over the same key set, arrays element-wise
/// in order.
pub fn matches(filter: &Map<String, Value>, record: &Value) -> bool {
    let Some(fields) = record.as_object() else {
        return false;
    };

    filter
        .iter()
        .all(|(name, wanted)| {
            fields
                .get(name)
                .is_some_and(|actual| deep_eq(wanted, actual))
        })
}

/// Structural equality with numeric normalization.
fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(l, r)| deep_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, l)| y.get(k).is_some_and(|r| deep_eq(l, r)))
        }
        _ => a == b,
    }
}

// serde_json keeps 1, 1u64 and 1.0 as distinct representations; queries
// must treat them as the same number.
fn number_eq(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }

    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }

    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
