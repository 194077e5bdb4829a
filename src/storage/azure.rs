use async_trait::async_trait;
use bytes::Bytes;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::{path::Path, ObjectStore};

use super::Storage;
use crate::error::ScanError;

/// Azure Blob Storage byte source. Account credentials come from the
/// environment.
pub struct AzureStorage {
    store: Box<dyn ObjectStore>,
}

impl AzureStorage {
    pub fn new(container: &str) -> Result<Self, ScanError> {
        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()?;
        Ok(Self {
            store: Box::new(store),
        })
    }
}

#[async_trait]
impl Storage for AzureStorage {
    async fn get(&self, path: &str) -> Result<Bytes, ScanError> {
        let path = Path::from(path.trim_start_matches('/'));
        Ok(self.store.get(&path).await?.bytes().await?)
    }
}
