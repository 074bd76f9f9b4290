//! Conversation export load job.

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::{AppError, Result};
use crate::models::{Config, SourceConfig};
use crate::services::{BatchLoader, LoadSummary};
use crate::storage::{ObjectLocation, ObjectStore};
use crate::transform::{read_rows, transform_rows};
use crate::warehouse::QueryExecutor;

const SUCCESS_BODY: &str = "Data cleaned and uploaded successfully";

/// Lambda invocation payload. Both fields fall back to configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadRequest {
    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default)]
    pub key: Option<String>,
}

impl LoadRequest {
    /// Source object for this invocation.
    pub fn location(&self, source: &SourceConfig) -> ObjectLocation {
        ObjectLocation::new(
            self.bucket.clone().unwrap_or_else(|| source.bucket.clone()),
            self.key.clone().unwrap_or_else(|| source.key.clone()),
        )
    }
}

/// Lambda response payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Run the load and fold any request-level failure into a 500 response.
///
/// Row-level failures only show up in the logs.
#[instrument(skip(store, executor, config))]
pub async fn handle_load(
    store: &dyn ObjectStore,
    executor: &dyn QueryExecutor,
    config: &Config,
    request: LoadRequest,
) -> LoadResponse {
    let location = request.location(&config.source);

    match run_load(store, executor, config, &location).await {
        Ok(_) => LoadResponse {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        },
        Err(e) => {
            error!("Load from {} failed: {}", location, e);
            LoadResponse {
                status_code: 500,
                body: e.to_string(),
            }
        }
    }
}

/// Fetch, parse, normalize and insert one export.
pub async fn run_load(
    store: &dyn ObjectStore,
    executor: &dyn QueryExecutor,
    config: &Config,
    location: &ObjectLocation,
) -> Result<LoadSummary> {
    if !location.is_configured() {
        return Err(AppError::config("source bucket or key is missing"));
    }

    let bytes = store.read_bytes(location).await?;
    let rows = read_rows(&bytes)?;
    info!("Read {} rows from {}", rows.len(), location);

    let records = transform_rows(&rows);
    let loader = BatchLoader::new(executor, &config.warehouse);
    Ok(loader.load(&records).await)
}
