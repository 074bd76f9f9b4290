//! AWS Lambda entry point for intent classification against the full
//! reference catalog
//!
//! Deploy behind an API Gateway proxy integration with
//! `cargo lambda build --release --features lambda --bin intent-classifier`.

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};

use amelia::handlers::{ApiGatewayRequest, ApiGatewayResponse, ClassifierVariant, handle_classify};
use amelia::llm::BedrockTextGenerator;
use amelia::models::Config;
use amelia::services::IntentClassifier;
use amelia::storage::S3ObjectStore;
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

    config.validate_classifier()?;
    info!("Intent classifier starting with model {}", config.classifier.model_id);

    let classifier = IntentClassifier::new(
        Arc::new(S3ObjectStore::from_env().await),
        Arc::new(BedrockTextGenerator::from_env(&config.classifier.model_id).await),
        &config.classifier,
    );
    let classifier = &classifier;

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<ApiGatewayRequest>| async move {
            let response =
                handle_classify(classifier, ClassifierVariant::Catalog, &event.payload).await;
            Ok::<ApiGatewayResponse, LambdaError>(response)
        },
    ))
    .await
}
