use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::Storage;
use crate::error::ScanError;

/// Filesystem-backed byte source rooted at a base directory.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn get(&self, path: &str) -> Result<Bytes, ScanError> {
        let full_path = self.base_path.join(path.trim_start_matches('/'));
        debug!(path = %full_path.display(), "opening local source");
        let mut file = File::open(full_path).await?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await?;
        Ok(Bytes::from(buf))
    }
}
