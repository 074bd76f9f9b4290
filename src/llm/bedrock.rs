//! AWS Bedrock Runtime text generation.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::llm::{GenerationRequest, GenerationResponse, TextGenerator};

/// Invokes one Bedrock model with a JSON body.
#[derive(Clone)]
pub struct BedrockTextGenerator {
    client: Client,
    model_id: String,
}

impl BedrockTextGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Create a generator from the ambient AWS configuration.
    pub async fn from_env(model_id: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), model_id)
    }
}

#[async_trait]
impl TextGenerator for BedrockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let body = serde_json::to_vec(request)?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("*/*")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| AppError::model(DisplayErrorContext(&e)))?;

        let response: GenerationResponse = serde_json::from_slice(output.body().as_ref())?;
        debug!(
            "Model {} returned {} result(s)",
            self.model_id,
            response.results.len()
        );
        Ok(response)
    }
}
