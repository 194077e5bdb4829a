use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use serde_json::{Map, Value as JsonValue};

use super::{FormatPlugin, RowStream};
use crate::error::ScanError;
use crate::schema::{Column, Row, TableSchema, Value, ValueType};

/// Newline-delimited JSON objects, one record per line (blank lines are
/// skipped). The first record fixes the column set and order; later records
/// are coerced onto it, with absent keys yielding nulls.
pub struct JsonFormat;

impl JsonFormat {
    fn first_object(data: &Bytes) -> Result<Map<String, JsonValue>, ScanError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| ScanError::malformed("json", e.to_string()))?;
        let line = text
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| ScanError::malformed("json", "no records in source"))?;
        Self::parse_record(line)
    }

    fn parse_record(line: &str) -> Result<Map<String, JsonValue>, ScanError> {
        match serde_json::from_str::<JsonValue>(line)? {
            JsonValue::Object(map) => Ok(map),
            other => Err(ScanError::malformed(
                "json",
                format!("expected an object per line, got {other}"),
            )),
        }
    }

    fn infer_type(value: &JsonValue) -> ValueType {
        match value {
            JsonValue::String(_) => ValueType::Text,
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
            JsonValue::Number(_) => ValueType::Float,
            JsonValue::Bool(_) => ValueType::Boolean,
            // nulls, arrays, and nested objects read back as their JSON text
            _ => ValueType::Text,
        }
    }

    fn coerce(column: &Column, value: &JsonValue) -> Result<Value, ScanError> {
        match (column.value_type, value) {
            (_, JsonValue::Null) => Ok(Value::Null),
            (ValueType::Text, JsonValue::String(s)) => Ok(Value::Text(s.clone())),
            (ValueType::Text, other) => Ok(Value::Text(other.to_string())),
            (ValueType::Integer, JsonValue::Number(n)) => {
                n.as_i64().map(Value::Integer).ok_or_else(|| {
                    ScanError::malformed(
                        "json",
                        format!("column {} expects an integer, got {n}", column.name),
                    )
                })
            }
            (ValueType::Float, JsonValue::Number(n)) => {
                n.as_f64().map(Value::Float).ok_or_else(|| {
                    ScanError::malformed(
                        "json",
                        format!("column {} expects a float, got {n}", column.name),
                    )
                })
            }
            (ValueType::Boolean, JsonValue::Bool(b)) => Ok(Value::Boolean(*b)),
            (expected, other) => Err(ScanError::malformed(
                "json",
                format!("column {} expects {expected}, got {other}", column.name),
            )),
        }
    }
}

impl FormatPlugin for JsonFormat {
    fn describe_schema(&self, data: &Bytes) -> Result<TableSchema, ScanError> {
        let first = Self::first_object(data)?;
        let columns = first
            .iter()
            .map(|(key, value)| Column::new(key.clone(), Self::infer_type(value)))
            .collect();
        Ok(TableSchema::new(columns))
    }

    fn produce_rows(&self, data: Bytes) -> Result<RowStream, ScanError> {
        let columns = self.describe_schema(&data)?.columns().to_vec();
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| ScanError::malformed("json", e.to_string()))?;
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();

        let rows = lines.into_iter().map(move |line| {
            let record = Self::parse_record(&line)?;
            columns
                .iter()
                .map(|column| {
                    let value = record.get(&column.name).unwrap_or(&JsonValue::Null);
                    Self::coerce(column, value)
                })
                .collect::<Result<Row, _>>()
        });
        Ok(stream::iter(rows).boxed())
    }
}
