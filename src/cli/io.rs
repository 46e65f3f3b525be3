//! CLI input and output
//!
//! - Records: a JSON array of objects, from a file or stdin
//! - Output: pretty JSON or HTML on stdout, UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::render::Record;

use super::errors::{CliError, CliResult};

/// Read list records from `path`, or from stdin when `None`
pub fn read_records(path: Option<&Path>) -> CliResult<Vec<Record>> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read records '{}': {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_records(&content)
}

/// Parse a JSON array of record objects
pub fn parse_records(content: &str) -> CliResult<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(CliError::invalid_records("expected a JSON array of records")),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(CliError::invalid_records(format!("record #{} is not an object", i + 1))),
        })
        .collect()
}

/// Write a value as pretty JSON to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write markup to stdout
pub fn write_html(html: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
