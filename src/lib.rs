pub mod error;
pub mod formats;
pub mod projector;
pub mod reader;
pub mod schema;
pub mod storage;

// Re-export key traits and types
pub use error::ScanError;
pub use formats::{FormatPlugin, RowStream};
pub use projector::Projection;
pub use reader::TableReader;
pub use schema::{Column, ColumnReference, Row, TableSchema, Value, ValueType};
pub use storage::Storage;
