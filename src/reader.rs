//! Table read orchestration.

use std::sync::Arc;

use tracing::debug;

use crate::error::ScanError;
use crate::formats::{self, RowStream};
use crate::projector::Projection;
use crate::schema::{ColumnReference, TableSchema};
use crate::storage::Storage;

/// Orchestrates one table read: plugin resolution, source open, schema
/// inference, projection resolution, then lazy streaming.
///
/// A reader holds no per-request state; concurrent reads through the same
/// reader are independent, each owning its own source bytes and schema.
pub struct TableReader {
    storage: Arc<dyn Storage>,
}

impl TableReader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Infer a table's schema without producing any rows.
    pub async fn describe(
        &self,
        format_identifier: &str,
        table_identifier: &str,
    ) -> Result<TableSchema, ScanError> {
        let plugin = formats::resolve(format_identifier)?;
        let data = self.storage.get(table_identifier).await?;
        plugin.describe_schema(&data)
    }

    /// Read a table as a lazy stream of rows reshaped to `requested`.
    ///
    /// Format resolution happens before the byte source is opened, and
    /// every fatal resolution error surfaces before the first row is
    /// yielded. Once the caller starts pulling rows, a mid-stream error
    /// ends the stream without retracting rows already delivered.
    pub async fn read(
        &self,
        format_identifier: &str,
        table_identifier: &str,
        requested: &[ColumnReference],
    ) -> Result<RowStream, ScanError> {
        let plugin = formats::resolve(format_identifier)?;
        let data = self.storage.get(table_identifier).await?;
        let schema = plugin.describe_schema(&data)?;
        let projection = Projection::resolve(&schema, requested)?;
        debug!(
            format = format_identifier,
            table = table_identifier,
            columns = requested.len(),
            "starting table scan"
        );
        Ok(projection.apply_stream(plugin.produce_rows(data)?))
    }
}
