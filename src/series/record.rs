use serde_json::{Map, Value};
use crate::error::{Error, Result};

/// A schema-less input row. Key order is kept as read so annotated output
/// lists the original fields first.
pub type Record = Map<String, Value>;

/// Extracts `field` from every record, failing on the first record that lacks
/// it or holds something other than a JSON number.
pub fn field_values(series: &[Record], field: &str) -> Result<Vec<f64>> {
    series
        .iter()
        .enumerate()
        .map(|(i, record)| match record.get(field) {
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                Error::InvalidInput(format!("record {} has an unrepresentable '{}' value", i, field))
            }),
            Some(other) => Err(Error::InvalidInput(format!(
                "record {} has non-numeric '{}' value: {}",
                i, field, other
            ))),
            None => Err(Error::InvalidInput(format!(
                "record {} is missing field '{}'",
                i, field
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_extracts_numbers() {
        let series = vec![
            record(json!({"date": "2024-01-01", "revenue": 10})),
            record(json!({"date": "2024-01-02", "revenue": 12.5})),
        ];
        assert_eq!(field_values(&series, "revenue").unwrap(), vec![10.0, 12.5]);
    }

    #[test]
    fn test_missing_field() {
        let series = vec![
            record(json!({"revenue": 10})),
            record(json!({"orders": 3})),
        ];
        let err = field_values(&series, "revenue").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg.contains("record 1")));
    }

    #[test]
    fn test_non_numeric_field() {
        let series = vec![record(json!({"revenue": "10"}))];
        assert!(matches!(
            field_values(&series, "revenue"),
            Err(Error::InvalidInput(_))
        ));
    }
}
