//! Object storage abstractions.
//!
//! The handlers only ever read whole objects: the conversation CSV export
//! and the intent reference CSV.
//!
//! ## Backends
//!
//! - [`S3ObjectStore`]: AWS S3 (feature `aws`)
//! - [`LocalObjectStore`]: `{root}/{bucket}/{key}` on disk, for local runs
//!   and tests

pub mod local;
#[cfg(feature = "aws")]
pub mod s3;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

// Re-export for convenience
pub use local::LocalObjectStore;
#[cfg(feature = "aws")]
pub use s3::S3ObjectStore;

/// Bucket and key of a single object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Both bucket and key are non-empty.
    pub fn is_configured(&self) -> bool {
        !self.bucket.trim().is_empty() && !self.key.trim().is_empty()
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Trait for object storage backends.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an object, returning `None` if it does not exist.
    async fn read_bytes_optional(&self, location: &ObjectLocation) -> Result<Option<Vec<u8>>>;

    /// Read an object; a missing object is [`AppError::NotFound`].
    async fn read_bytes(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        self.read_bytes_optional(location)
            .await?
            .ok_or_else(|| AppError::not_found(&location.bucket, &location.key))
    }
}
