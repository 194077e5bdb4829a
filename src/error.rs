//! Error types for filescan.

use thiserror::Error;

/// Fatal failure modes of a table scan.
///
/// All four variants are non-recoverable within this crate: they propagate
/// to the caller unchanged and are never coerced into empty results.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The format identifier matches no registered plugin
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Source content violates the format's structural expectations
    #[error("malformed {format} source: {reason}")]
    MalformedSource {
        format: &'static str,
        reason: String,
    },

    /// A requested column is absent from the inferred schema
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The byte source failed to open or errored mid-read
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedSource {
            format,
            reason: reason.into(),
        }
    }
}

impl From<object_store::Error> for ScanError {
    fn from(e: object_store::Error) -> Self {
        Self::Io(e.into())
    }
}

impl From<csv::Error> for ScanError {
    fn from(e: csv::Error) -> Self {
        let reason = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::malformed("delimited", reason),
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed("json", e.to_string())
    }
}
