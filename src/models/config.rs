//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Location of the conversation CSV export
    #[serde(default)]
    pub source: SourceConfig,

    /// Warehouse connection and load behavior
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Intent classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Defaults overridden by the Lambda environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Override values from environment-style variables.
    ///
    /// `S3_BUCKET_NAME` is shared by the export source and the intent
    /// reference file, matching how both functions are deployed.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bucket) = lookup("S3_BUCKET_NAME") {
            self.source.bucket = bucket.clone();
            self.classifier.intents_bucket = bucket;
        }
        if let Some(key) = lookup("S3_FILE_KEY") {
            self.source.key = key;
        }
        if let Some(key) = lookup("S3_CSV_KEY") {
            self.classifier.intents_key = key;
        }
        if let Some(model_id) = lookup("AWS_BEDROCK_MODEL_ID") {
            self.classifier.model_id = model_id;
        }
        if let Some(workgroup) = lookup("REDSHIFT_WORKGROUP_NAME") {
            self.warehouse.workgroup_name = workgroup;
        }
        if let Some(database) = lookup("REDSHIFT_DB") {
            self.warehouse.database = database;
        }
        if let Some(table) = lookup("REDSHIFT_TABLE") {
            self.warehouse.table = table;
        }
        if let Some(raw) = lookup("POLL_INTERVAL_MS") {
            match raw.parse() {
                Ok(ms) => self.warehouse.poll_interval_ms = ms,
                Err(_) => warn!("Ignoring POLL_INTERVAL_MS={:?}: not a number", raw),
            }
        }
        if let Some(raw) = lookup("MAX_WAIT_SECS") {
            match raw.parse() {
                Ok(secs) => self.warehouse.max_wait_secs = Some(secs),
                Err(_) => warn!("Ignoring MAX_WAIT_SECS={:?}: not a number", raw),
            }
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Check the settings the conversation loader needs.
    pub fn validate_loader(&self) -> Result<()> {
        if self.warehouse.workgroup_name.trim().is_empty() {
            return Err(AppError::validation("warehouse.workgroup_name is empty"));
        }
        if self.warehouse.database.trim().is_empty() {
            return Err(AppError::validation("warehouse.database is empty"));
        }
        if self.warehouse.table.trim().is_empty() {
            return Err(AppError::validation("warehouse.table is empty"));
        }
        if self.warehouse.poll_interval_ms == 0 {
            return Err(AppError::validation(
                "warehouse.poll_interval_ms must be > 0",
            ));
        }
        if self.warehouse.max_wait_secs == Some(0) {
            return Err(AppError::validation("warehouse.max_wait_secs must be > 0"));
        }
        Ok(())
    }

    /// Check the settings the intent classifiers need.
    pub fn validate_classifier(&self) -> Result<()> {
        if self.classifier.model_id.trim().is_empty() {
            return Err(AppError::validation("classifier.model_id is empty"));
        }
        if self.classifier.intents_bucket.trim().is_empty()
            || self.classifier.intents_key.trim().is_empty()
        {
            return Err(AppError::validation(
                "classifier.intents_bucket and classifier.intents_key are required",
            ));
        }
        let generation = &self.classifier.generation;
        if generation.max_token_count == 0 {
            return Err(AppError::validation(
                "classifier.generation.max_token_count must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&generation.top_p) {
            return Err(AppError::validation(
                "classifier.generation.top_p must be within 0..=1",
            ));
        }
        Ok(())
    }
}

/// Where the conversation export lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub bucket: String,

    #[serde(default)]
    pub key: String,
}

/// Warehouse (Redshift Serverless) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    #[serde(default)]
    pub workgroup_name: String,

    #[serde(default)]
    pub database: String,

    /// Destination table
    #[serde(default = "defaults::table")]
    pub table: String,

    /// Delay between statement status checks
    #[serde(default = "defaults::poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on waiting for one statement. Unset waits forever.
    #[serde(default)]
    pub max_wait_secs: Option<u64>,
}

impl WarehouseConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_secs.map(Duration::from_secs)
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            workgroup_name: String::new(),
            database: String::new(),
            table: defaults::table(),
            poll_interval_ms: defaults::poll_interval_ms(),
            max_wait_secs: None,
        }
    }
}

/// Intent classifier settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Hosted model identifier
    #[serde(default)]
    pub model_id: String,

    /// Bucket holding the `intent,utterance` reference CSV
    #[serde(default)]
    pub intents_bucket: String,

    #[serde(default)]
    pub intents_key: String,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Sampling parameters sent with every prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "defaults::max_token_count")]
    pub max_token_count: u32,

    #[serde(default = "defaults::temperature")]
    pub temperature: f32,

    #[serde(default = "defaults::top_p")]
    pub top_p: f32,

    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_token_count: defaults::max_token_count(),
            temperature: defaults::temperature(),
            top_p: defaults::top_p(),
            stop_sequences: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Warehouse defaults
    pub fn table() -> String {
        "conversations".into()
    }
    pub fn poll_interval_ms() -> u64 {
        2000
    }

    // Generation defaults
    pub fn max_token_count() -> u32 {
        512
    }
    pub fn temperature() -> f32 {
        0.7
    }
    pub fn top_p() -> f32 {
        0.9
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn loader_config() -> Config {
        let mut config = Config::default();
        config.warehouse.workgroup_name = "analytics".to_string();
        config.warehouse.database = "dev".to_string();
        config
    }

    #[test]
    fn defaults_match_deployed_behavior() {
        let config = Config::default();
        assert_eq!(config.warehouse.table, "conversations");
        assert_eq!(config.warehouse.poll_interval(), Duration::from_secs(2));
        assert!(config.warehouse.max_wait().is_none());
        assert_eq!(config.classifier.generation.max_token_count, 512);
        assert_eq!(config.classifier.generation.temperature, 0.7);
        assert_eq!(config.classifier.generation.top_p, 0.9);
        assert!(config.classifier.generation.stop_sequences.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [warehouse]
            workgroup_name = "analytics"
            database = "dev"
            max_wait_secs = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.warehouse.table, "conversations");
        assert_eq!(config.warehouse.poll_interval_ms, 2000);
        assert_eq!(config.warehouse.max_wait(), Some(Duration::from_secs(300)));
        assert_eq!(config.logging.level, "info");
        assert!(config.validate_loader().is_ok());
    }

    #[test]
    fn env_overrides_apply_original_variable_names() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("S3_BUCKET_NAME", "amelia-data"),
            ("S3_FILE_KEY", "exports/conversations.csv"),
            ("S3_CSV_KEY", "intents/intents.csv"),
            ("AWS_BEDROCK_MODEL_ID", "amazon.titan-text-express-v1"),
            ("REDSHIFT_WORKGROUP_NAME", "analytics"),
            ("REDSHIFT_DB", "dev"),
        ]));

        assert_eq!(config.source.bucket, "amelia-data");
        assert_eq!(config.classifier.intents_bucket, "amelia-data");
        assert_eq!(config.source.key, "exports/conversations.csv");
        assert_eq!(config.classifier.intents_key, "intents/intents.csv");
        assert!(config.validate_loader().is_ok());
        assert!(config.validate_classifier().is_ok());
    }

    #[test]
    fn unparsable_numeric_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[("POLL_INTERVAL_MS", "soon"), ("MAX_WAIT_SECS", "60")]));
        assert_eq!(config.warehouse.poll_interval_ms, 2000);
        assert_eq!(config.warehouse.max_wait_secs, Some(60));
    }

    #[test]
    fn validate_loader_rejects_missing_workgroup() {
        let mut config = loader_config();
        config.warehouse.workgroup_name = " ".to_string();
        assert!(config.validate_loader().is_err());
    }

    #[test]
    fn validate_loader_rejects_zero_poll_interval() {
        let mut config = loader_config();
        config.warehouse.poll_interval_ms = 0;
        assert!(config.validate_loader().is_err());
    }

    #[test]
    fn validate_classifier_requires_intents_location() {
        let mut config = Config::default();
        config.classifier.model_id = "amazon.titan-text-express-v1".to_string();
        assert!(config.validate_classifier().is_err());

        config.classifier.intents_bucket = "amelia-data".to_string();
        config.classifier.intents_key = "intents.csv".to_string();
        assert!(config.validate_classifier().is_ok());
    }
}
