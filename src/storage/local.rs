//! Local filesystem object storage.
//!
//! Mirrors the S3 layout on disk for development and testing:
//!
//! ```text
//! {root}/
//! └── {bucket}/
//!     ├── exports/conversations.csv
//!     └── intents/intents.csv
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::error::{AppError, Result};
use crate::storage::{ObjectLocation, ObjectStore};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root_dir: PathBuf,
}

impl LocalObjectStore {
    /// Create a new store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a location.
    pub fn path(&self, location: &ObjectLocation) -> PathBuf {
        self.root_dir.join(&location.bucket).join(&location.key)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn read_bytes_optional(&self, location: &ObjectLocation) -> Result<Option<Vec<u8>>> {
        let path = self.path(location);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No object at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_bucket_relative_path() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("amelia-data/intents");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("intents.csv"), b"Billing,Why is my bill high\n").unwrap();

        let store = LocalObjectStore::new(tmp.path());
        let bytes = store
            .read_bytes(&ObjectLocation::new("amelia-data", "intents/intents.csv"))
            .await
            .unwrap();
        assert_eq!(bytes, b"Billing,Why is my bill high\n");
    }

    #[tokio::test]
    async fn missing_object_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = LocalObjectStore::new(tmp.path());

        let location = ObjectLocation::new("amelia-data", "nope.csv");
        assert!(store.read_bytes_optional(&location).await.unwrap().is_none());
        assert!(store.read_bytes(&location).await.unwrap_err().is_not_found());
    }
}
