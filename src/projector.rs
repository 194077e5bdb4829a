//! Name-based row projection.

use futures::StreamExt;

use crate::error::ScanError;
use crate::formats::RowStream;
use crate::schema::{ColumnReference, Row, TableSchema};

/// A resolved projection: source row positions in requested column order.
///
/// Resolution happens eagerly, once per read request; reshaping is lazy,
/// once per row. The index map may contain repeated or permuted positions,
/// so duplicated and reordered columns need no special casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    indexes: Vec<usize>,
}

impl Projection {
    /// Resolve requested references against an inferred schema. Names match
    /// case-insensitively and the first matching schema column wins.
    ///
    /// Fails with `UnknownColumn` when any reference matches no column, and
    /// does so before any row is touched.
    pub fn resolve(
        schema: &TableSchema,
        requested: &[ColumnReference],
    ) -> Result<Self, ScanError> {
        let indexes = requested
            .iter()
            .map(|reference| {
                schema
                    .index_of(&reference.name)
                    .ok_or_else(|| ScanError::UnknownColumn(reference.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { indexes })
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Reshape one row into the requested column order.
    ///
    /// Assumes the row has schema arity, which the plugin contract
    /// guarantees. No type coercion happens here.
    pub fn apply(&self, row: &Row) -> Row {
        self.indexes.iter().map(|&index| row[index].clone()).collect()
    }

    /// Lazily reshape every row of a stream; drives the underlying stream
    /// forward and does nothing else.
    pub fn apply_stream(self, rows: RowStream) -> RowStream {
        rows.map(move |row| row.map(|row| self.apply(&row))).boxed()
    }
}
