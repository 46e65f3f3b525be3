//! Default ordering of list rows
//!
//! Sorts records by the configured `sort_by` field. The sort is stable, so
//! records with equal keys keep their input order in both directions.

use std::cmp::Ordering;

use serde_json::Value;

use crate::registry::SortSpec;

use super::Record;

/// Sorts list records
pub struct RecordSorter;

impl RecordSorter {
    pub fn sort(records: &mut [Record], sort: &SortSpec) {
        records.sort_by(|a, b| {
            let ordering = compare(a.get(&sort.field), b.get(&sort.field));
            if sort.reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

/// Missing < null < bool < number < string; arrays and objects tie.
fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let rank = |v: Option<&Value>| -> u8 {
        match v {
            None => 0,
            Some(Value::Null) => 1,
            Some(Value::Bool(_)) => 2,
            Some(Value::Number(_)) => 3,
            Some(Value::String(_)) => 4,
            Some(Value::Array(_)) => 5,
            Some(Value::Object(_)) => 6,
        }
    };

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
