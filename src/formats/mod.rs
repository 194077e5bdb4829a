use std::collections::HashMap;

use bytes::Bytes;
use futures::stream::BoxStream;
use lazy_static::lazy_static;

use crate::error::ScanError;
use crate::schema::{Row, TableSchema};

mod delimited_format;
mod json_format;
mod raw_format;
#[cfg(test)]
mod tests;

pub use delimited_format::{DelimitedConfig, DelimitedFormat};
pub use json_format::JsonFormat;
pub use raw_format::RawFormat;

/// Lazy, finite, one-pass sequence of produced rows. Consuming it drains
/// the underlying source; it cannot be restarted.
pub type RowStream = BoxStream<'static, Result<Row, ScanError>>;

/// A file-format adapter: infers a column schema from a table's content and
/// produces rows against that schema.
pub trait FormatPlugin: Send + Sync {
    /// Inspect the content and describe its columns, reading only as much
    /// as needed. Must agree with `produce_rows` on column count and order
    /// for the same content.
    fn describe_schema(&self, data: &Bytes) -> Result<TableSchema, ScanError>;

    /// Produce rows in source order. Each row's arity and per-position type
    /// match the schema from `describe_schema` over the same content. Rows
    /// already yielded are never retracted when a later row errors.
    fn produce_rows(&self, data: Bytes) -> Result<RowStream, ScanError>;
}

type FormatFactory = fn() -> Box<dyn FormatPlugin>;

lazy_static! {
    static ref FORMAT_REGISTRY: HashMap<&'static str, FormatFactory> = {
        let mut m: HashMap<&'static str, FormatFactory> = HashMap::new();
        m.insert("raw", || Box::new(RawFormat));
        m.insert("csv", || {
            Box::new(DelimitedFormat::new(&DelimitedConfig::default()))
        });
        m.insert("tsv", || {
            Box::new(DelimitedFormat::new(&DelimitedConfig::tab()))
        });
        m.insert("json", || Box::new(JsonFormat));
        m
    };
}

/// Look up the plugin for a format identifier, case-insensitively.
///
/// Fails closed: an identifier outside the registered set is
/// `UnsupportedFormat`, never a fallback plugin.
pub fn resolve(identifier: &str) -> Result<Box<dyn FormatPlugin>, ScanError> {
    FORMAT_REGISTRY
        .get(identifier.to_ascii_lowercase().as_str())
        .map(|factory| factory())
        .ok_or_else(|| ScanError::UnsupportedFormat(identifier.to_string()))
}
