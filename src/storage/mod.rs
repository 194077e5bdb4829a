use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::ScanError;

mod azure;
mod local;
mod s3;

pub use azure::AzureStorage;
pub use local::LocalStorage;
pub use s3::S3Storage;

/// Byte-source accessor: turns a table identifier into that table's
/// content.
///
/// Each call materializes an independent snapshot owned by the requesting
/// read; dropping the result releases it on every exit path.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the content behind a table identifier. Open and read failures
    /// surface as `ScanError::Io`.
    async fn get(&self, path: &str) -> Result<Bytes, ScanError>;
}

/// Create a storage backend from a base URL string
pub fn from_url(url: &str) -> Result<Box<dyn Storage>, ScanError> {
    let parsed = Url::parse(url)
        .map_err(|e| invalid_input(format!("invalid storage URL {url}: {e}")))?;

    match parsed.scheme() {
        "file" => Ok(Box::new(LocalStorage::new(parsed.path()))),
        "s3" => {
            let bucket = parsed
                .host_str()
                .ok_or_else(|| invalid_input(format!("no bucket in S3 URL: {url}")))?;
            Ok(Box::new(S3Storage::new(bucket)?))
        }
        "azure" => {
            let container = parsed.host_str().ok_or_else(|| {
                invalid_input(format!("no container in Azure URL: {url}"))
            })?;
            Ok(Box::new(AzureStorage::new(container)?))
        }
        scheme => Err(invalid_input(format!("unsupported storage scheme: {scheme}"))),
    }
}

fn invalid_input(reason: String) -> ScanError {
    ScanError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        reason,
    ))
}
