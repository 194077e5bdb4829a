use std::io::Cursor;

use bytes::Bytes;
use csv::{ReaderBuilder, StringRecord};
use futures::stream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::{FormatPlugin, RowStream};
use crate::error::ScanError;
use crate::schema::{Column, Row, TableSchema, Value, ValueType};

/// Configuration for delimiter-separated text sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelimitedConfig {
    /// Field separator byte
    pub delimiter: u8,
    /// Whether the first record names the columns
    pub has_header: bool,
}

impl Default for DelimitedConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

impl DelimitedConfig {
    /// Tab-separated variant sharing the same engine.
    pub fn tab() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}

/// Delimited text (CSV, TSV). Every column is `text`; the header record
/// supplies the names, or positional `field_N` names when there is none.
pub struct DelimitedFormat {
    config: DelimitedConfig,
}

impl DelimitedFormat {
    pub fn new(config: &DelimitedConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl FormatPlugin for DelimitedFormat {
    fn describe_schema(&self, data: &Bytes) -> Result<TableSchema, ScanError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(data.clone()));

        let mut first = StringRecord::new();
        if !reader.read_record(&mut first)? {
            return Err(ScanError::malformed(
                "delimited",
                "cannot infer columns from an empty source",
            ));
        }

        let columns = first
            .iter()
            .enumerate()
            .map(|(position, field)| {
                let name = if self.config.has_header {
                    field.to_string()
                } else {
                    format!("field_{position}")
                };
                Column::new(name, ValueType::Text)
            })
            .collect();
        Ok(TableSchema::new(columns))
    }

    fn produce_rows(&self, data: Bytes) -> Result<RowStream, ScanError> {
        let arity = self.describe_schema(&data)?.len();
        let records = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            // with has_headers(true) the reader skips the header record
            .has_headers(self.config.has_header)
            .flexible(true)
            .from_reader(Cursor::new(data))
            .into_records();

        // Normalize every record to the schema arity: extra fields are
        // dropped, missing trailing fields become nulls.
        let rows = records.map(move |record| {
            let record = record.map_err(ScanError::from)?;
            let mut row: Row = record
                .iter()
                .take(arity)
                .map(|field| Value::Text(field.to_string()))
                .collect();
            row.resize(arity, Value::Null);
            Ok(row)
        });
        Ok(stream::iter(rows).boxed())
    }
}
