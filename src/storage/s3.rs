//! AWS S3 object storage.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::storage::{ObjectLocation, ObjectStore};

/// S3-backed object reads.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a store around an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a store from the ambient AWS configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn read_bytes_optional(&self, location: &ObjectLocation) -> Result<Option<Vec<u8>>> {
        let result = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(AppError::s3)?;
                let bytes = bytes.into_bytes().to_vec();
                debug!("Read {} bytes from {}", bytes.len(), location);
                Ok(Some(bytes))
            }
            Err(err) => {
                // Check if it's a "not found" error
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    info!("No object at {}", location);
                    Ok(None)
                } else {
                    Err(AppError::s3(DisplayErrorContext(&service_err)))
                }
            }
        }
    }
}
