//! Intent reference data and classifier request/response payloads.

use serde::{Deserialize, Serialize};

/// Candidate intents with their example utterances, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

/// A label and the example utterances listed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub label: String,
    pub examples: Vec<String>,
}

impl IntentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an example, creating the intent on first sight.
    pub fn add_example(&mut self, label: &str, example: impl Into<String>) {
        let example = example.into();
        match self.intents.iter_mut().find(|i| i.label == label) {
            Some(intent) => intent.examples.push(example),
            None => self.intents.push(Intent {
                label: label.to_string(),
                examples: vec![example],
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// JSON body of a classification request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub utterance: Option<String>,

    /// Labels the candidate set is restricted to (scoped variant only)
    #[serde(default)]
    pub intents: Option<Vec<String>>,
}

/// JSON body of a successful classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyResponse {
    pub utterance: String,
    pub intent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_groups_examples_in_first_seen_order() {
        let mut catalog = IntentCatalog::new();
        catalog.add_example("Billing", "Why is my bill high");
        catalog.add_example("Outage", "My internet is down");
        catalog.add_example("Billing", "I was charged twice");

        let labels: Vec<_> = catalog.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["Billing", "Outage"]);
        assert_eq!(catalog.get("Billing").unwrap().examples.len(), 2);
    }

    #[test]
    fn classify_request_fields_are_optional() {
        let req: ClassifyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.utterance.is_none());
        assert!(req.intents.is_none());

        let req: ClassifyRequest =
            serde_json::from_str(r#"{"utterance": "hi", "intents": ["A", "B"]}"#).unwrap();
        assert_eq!(req.utterance.as_deref(), Some("hi"));
        assert_eq!(req.intents.unwrap(), ["A", "B"]);
    }
}
