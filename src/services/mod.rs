//! Service layer.
//!
//! - Warehouse loading (`BatchLoader`)
//! - Intent classification (`IntentClassifier`) with its reference-data
//!   parser and prompt template

pub mod classifier;
pub mod intents;
pub mod loader;
pub mod prompt;

pub use classifier::{IntentClassifier, parse_label};
pub use intents::parse_intents;
pub use loader::{BatchLoader, LoadSummary};
pub use prompt::build_prompt;
