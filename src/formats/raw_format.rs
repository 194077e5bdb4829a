use bytes::Bytes;
use futures::stream;
use futures::StreamExt;

use super::{FormatPlugin, RowStream};
use crate::error::ScanError;
use crate::schema::{Column, TableSchema, Value, ValueType};

/// Treats the whole source as one opaque blob: a single `text` column named
/// `data`, and exactly one row holding the line-joined content.
pub struct RawFormat;

impl FormatPlugin for RawFormat {
    fn describe_schema(&self, _data: &Bytes) -> Result<TableSchema, ScanError> {
        Ok(TableSchema::new(vec![Column::new("data", ValueType::Text)]))
    }

    fn produce_rows(&self, data: Bytes) -> Result<RowStream, ScanError> {
        // Joining lines normalizes the trailing newline; an empty source
        // still yields one row holding the empty string.
        let text = String::from_utf8_lossy(&data);
        let blob = text.lines().collect::<Vec<_>>().join("\n");
        Ok(stream::iter(vec![Ok(vec![Value::Text(blob)])]).boxed())
    }
}
