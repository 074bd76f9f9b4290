//! Conversation export rows and the structures parsed out of them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One line of the conversation log CSV export.
///
/// Empty cells deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConversationRow {
    #[serde(rename = "Conversation Id", default)]
    pub conversation_id: Option<String>,

    /// Creation timestamp, e.g. `2025-02-11T14:03:27.512000Z`
    #[serde(rename = "Created", default)]
    pub created: Option<String>,

    #[serde(rename = "Channel", default)]
    pub channel: Option<String>,

    /// `[Speaker]: message||[Speaker]: message`
    #[serde(rename = "Transcript", default)]
    pub transcript: Option<String>,

    /// `Key=value||Key=value`
    #[serde(rename = "Custom Metrics", default)]
    pub custom_metrics: Option<String>,
}

/// A single speaker turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptEntry {
    #[serde(rename = "Speaker")]
    pub speaker: String,

    #[serde(rename = "Message")]
    pub message: String,
}

/// Key/value pairs parsed from the `Custom Metrics` column.
///
/// Keeps first-seen key order; a repeated key overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMetrics {
    entries: Vec<(String, String)>,
}

impl CustomMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or `""` when absent.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// `true` only when the value is exactly `"True"`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("True")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for CustomMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
