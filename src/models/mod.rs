// src/models/mod.rs

//! Domain models shared by the loader and the classifiers.

mod config;
mod conversation;
mod intent;
mod record;

// Re-export all public types
pub use config::{
    ClassifierConfig, Config, GenerationConfig, LoggingConfig, SourceConfig, WarehouseConfig,
};
pub use conversation::{ConversationRow, CustomMetrics, TranscriptEntry};
pub use intent::{ClassifyRequest, ClassifyResponse, Intent, IntentCatalog};
pub use record::NormalizedRecord;
