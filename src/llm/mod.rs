//! Hosted text-generation model access.
//!
//! Request and response types follow the Titan text JSON body:
//!
//! ```json
//! {"inputText": "...", "textGenerationConfig": {"maxTokenCount": 512, ...}}
//! {"results": [{"outputText": "..."}]}
//! ```

#[cfg(feature = "aws")]
pub mod bedrock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::GenerationConfig;

#[cfg(feature = "aws")]
pub use bedrock::BedrockTextGenerator;

/// A single prompt plus sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input_text: String,
    pub text_generation_config: TextGenerationConfig,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, config: &GenerationConfig) -> Self {
        Self {
            input_text: prompt.into(),
            text_generation_config: TextGenerationConfig::from(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGenerationConfig {
    pub max_token_count: u32,
    pub stop_sequences: Vec<String>,
    pub temperature: f32,
    pub top_p: f32,
}

impl From<&GenerationConfig> for TextGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_token_count: config.max_token_count,
            stop_sequences: config.stop_sequences.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// Model reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub results: Vec<GenerationResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default)]
    pub output_text: Option<String>,
}

impl GenerationResponse {
    /// Output text of the first result, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.results.first()?.output_text.as_deref()
    }
}

/// Trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
