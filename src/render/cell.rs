//! Cell text for one field of one record

use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::errors::{AdminError, AdminResult};
use crate::model::SemanticType;
use crate::registry::validate_strftime;
use crate::resolver::ResolvedField;

use super::Record;

/// Shown for missing and null values
pub const EMPTY_CELL: &str = "-";

/// Display text of `field` for `record`.
///
/// A formatter wins over every default. Without one, temporal values are
/// formatted with the field's date pattern, booleans become check marks and
/// association values list their members.
pub fn cell_value(field: &ResolvedField, record: &Record) -> AdminResult<String> {
    let value = record.get(field.name()).unwrap_or(&Value::Null);

    if let Some(formatter) = field.formatter() {
        return formatter
            .format(value)
            .map_err(|source| AdminError::FormatterFailed {
                field: field.name().to_string(),
                source,
            });
    }

    let text = match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::Bool(true) => "\u{2713}".to_string(),
        Value::Bool(false) => "\u{2718}".to_string(),
        Value::String(s) if field.semantic_type().is_temporal() => format_temporal(field, s)?,
        Value::Array(items) => items
            .iter()
            .map(member_label)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) if field.association().is_some() => member_label(value),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Ok(text)
}

fn format_temporal(field: &ResolvedField, raw: &str) -> AdminResult<String> {
    let pattern = field.date_pattern();
    validate_strftime(&pattern)?;

    let formatted = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        display(dt.format(&pattern))
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        display(dt.format(&pattern))
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        display(date.format(&pattern))
    } else if *field.semantic_type() == SemanticType::Time {
        NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .ok()
            .and_then(|t| display(t.format(&pattern)))
    } else {
        None
    };

    // Unparsable values, or a pattern asking for parts the value lacks,
    // show the stored text.
    Ok(formatted.unwrap_or_else(|| raw.to_string()))
}

fn display(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}

/// Label of one associated record: its name, else its title, else `#id`
fn member_label(value: &Value) -> String {
    match value {
        Value::Object(map) => ["name", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| map.get("id").map(|id| format!("#{}", plain(id))))
            .unwrap_or_else(|| EMPTY_CELL.to_string()),
        other => plain(other),
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
