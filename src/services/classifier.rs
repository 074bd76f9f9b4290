//! Intent classification service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::llm::{GenerationRequest, TextGenerator};
use crate::models::{ClassifierConfig, GenerationConfig, IntentCatalog};
use crate::services::intents::parse_intents;
use crate::services::prompt::build_prompt;
use crate::storage::{ObjectLocation, ObjectStore};

/// Prefix the model is asked to echo before the label.
const REPLY_PREFIX: &str = "utterance ==";

/// Labels utterances with intents from a reference file.
#[derive(Clone)]
pub struct IntentClassifier {
    store: Arc<dyn ObjectStore>,
    model: Arc<dyn TextGenerator>,
    intents: ObjectLocation,
    generation: GenerationConfig,
}

impl IntentClassifier {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        model: Arc<dyn TextGenerator>,
        config: &ClassifierConfig,
    ) -> Self {
        Self {
            store,
            model,
            intents: ObjectLocation::new(&config.intents_bucket, &config.intents_key),
            generation: config.generation.clone(),
        }
    }

    /// Load the reference intents, optionally restricted to `selected`.
    pub async fn load_intents(&self, selected: Option<&[String]>) -> Result<IntentCatalog> {
        if !self.intents.is_configured() {
            return Err(AppError::config("intents bucket or key is missing"));
        }

        let bytes = self.store.read_bytes(&self.intents).await?;
        let catalog = parse_intents(&bytes, selected)?;
        info!("Loaded {} intents from {}", catalog.len(), self.intents);
        Ok(catalog)
    }

    /// Ask the model to label `utterance` with one of the catalog's intents.
    pub async fn label(&self, utterance: &str, catalog: &IntentCatalog) -> Result<String> {
        let prompt = build_prompt(utterance, catalog);
        debug!("Prompt is {} bytes", prompt.len());

        let response = self
            .model
            .generate(&GenerationRequest::new(prompt, &self.generation))
            .await?;
        let text = response
            .first_text()
            .ok_or_else(|| AppError::model("response carried no output text"))?;

        Ok(parse_label(text))
    }
}

/// Strip the echoed `utterance ==` prefix and surrounding whitespace.
pub fn parse_label(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(REPLY_PREFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
