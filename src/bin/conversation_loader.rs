//! AWS Lambda entry point for the conversation loader
//!
//! Deploy with `cargo lambda build --release --features lambda --bin conversation-loader`.
//! Invoke on a schedule or with `{"bucket": "...", "key": "..."}` to load another export.

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};

use amelia::handlers::{LoadRequest, LoadResponse, handle_load};
use amelia::models::Config;
use amelia::storage::S3ObjectStore;
use amelia::warehouse::RedshiftDataExecutor;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    config.validate_loader()?;
    info!(
        "Conversation loader starting: {}/{} table {}",
        config.warehouse.workgroup_name, config.warehouse.database, config.warehouse.table
    );

    let store = S3ObjectStore::from_env().await;
    let executor = RedshiftDataExecutor::from_env(&config.warehouse).await;

    let config = &config;
    let store = &store;
    let executor = &executor;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<LoadRequest>| async move {
        let (request, _context) = event.into_parts();
        Ok::<LoadResponse, LambdaError>(handle_load(store, executor, config, request).await)
    }))
    .await
}
