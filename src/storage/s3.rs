use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::{path::Path, ObjectStore};

use super::Storage;
use crate::error::ScanError;

/// S3-backed byte source. Credentials and region come from the
/// environment.
pub struct S3Storage {
    store: Box<dyn ObjectStore>,
}

impl S3Storage {
    pub fn new(bucket: &str) -> Result<Self, ScanError> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()?;
        Ok(Self {
            store: Box::new(store),
        })
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn get(&self, path: &str) -> Result<Bytes, ScanError> {
        let path = Path::from(path.trim_start_matches('/'));
        Ok(self.store.get(&path).await?.bytes().await?)
    }
}
