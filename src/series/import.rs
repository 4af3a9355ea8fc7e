use crate::error::{Error, Result};
use crate::series::Record;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn load_series(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let series = parse_series(&content)?;
    log::debug!("Loaded {} records from {}", series.len(), path.display());
    Ok(series)
}

/// Parses a JSON array of flat objects. Order is kept exactly as given.
pub fn parse_series(content: &str) -> Result<Vec<Record>> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| Error::InvalidInput(format!("Invalid JSON in input file: {}", e)))?;

    let items = match document {
        Value::Array(items) => items,
        other => {
            return Err(Error::InvalidInput(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(Error::InvalidInput(format!(
                "record {} is {}, expected an object",
                i,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
