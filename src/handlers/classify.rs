//! Intent classification endpoint.

use serde_json::error::Category;
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::error::Result;
use crate::handlers::{ApiGatewayRequest, ApiGatewayResponse, json_response};
use crate::models::{ClassifyRequest, ClassifyResponse};
use crate::services::IntentClassifier;

const LOAD_FAILED: &str = "Failed to load intents from S3";

/// Which candidate set the endpoint classifies against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierVariant {
    /// Every intent in the reference file
    Catalog,
    /// Only the intents named in the request's `intents` field
    Scoped,
}

impl ClassifierVariant {
    fn missing_fields_message(self) -> &'static str {
        match self {
            Self::Catalog => "Utterance is required",
            Self::Scoped => "Utterance and intents are required",
        }
    }
}

/// Handle one classification request.
///
/// - 400: missing `utterance` (or `intents` for [`ClassifierVariant::Scoped`])
/// - 500: reference intents could not be loaded, or anything else failed
/// - 200: `{"utterance": ..., "intent": ...}`
#[instrument(skip(classifier, request))]
pub async fn handle_classify(
    classifier: &IntentClassifier,
    variant: ClassifierVariant,
    request: &ApiGatewayRequest,
) -> ApiGatewayResponse {
    match classify(classifier, variant, request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Classification failed: {}", e);
            json_response(
                500,
                json!({"message": "Internal server error", "error": e.to_string()}),
            )
        }
    }
}

async fn classify(
    classifier: &IntentClassifier,
    variant: ClassifierVariant,
    request: &ApiGatewayRequest,
) -> Result<ApiGatewayResponse> {
    let body: ClassifyRequest = match serde_json::from_str(request.body.as_deref().unwrap_or("{}")) {
        Ok(body) => body,
        // Well-formed JSON with wrong-typed fields is a client error.
        Err(e) if e.classify() == Category::Data => {
            warn!("Rejected request body: {}", e);
            return Ok(bad_request(variant));
        }
        Err(e) => return Err(e.into()),
    };

    let utterance = body.utterance.filter(|u| !u.is_empty());
    let selected = body.intents.filter(|i| !i.is_empty());

    let Some(utterance) = utterance else {
        return Ok(bad_request(variant));
    };
    let filter = match variant {
        ClassifierVariant::Catalog => None,
        ClassifierVariant::Scoped => match selected.as_deref() {
            Some(selected) => Some(selected),
            None => return Ok(bad_request(variant)),
        },
    };

    let catalog = match classifier.load_intents(filter).await {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            warn!("No matching intents in reference data");
            return Ok(json_response(500, json!({"message": LOAD_FAILED})));
        }
        Err(e) => {
            error!("Error loading intents from S3: {}", e);
            return Ok(json_response(500, json!({"message": LOAD_FAILED})));
        }
    };

    let intent = classifier.label(&utterance, &catalog).await?;
    info!("Labelled utterance as {:?}", intent);

    let body = serde_json::to_value(ClassifyResponse { utterance, intent })?;
    Ok(json_response(200, body))
}

fn bad_request(variant: ClassifierVariant) -> ApiGatewayResponse {
    json_response(400, json!({"message": variant.missing_fields_message()}))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::ClassifierConfig;
    use crate::testing::{FakeGenerator, MemoryObjectStore};

    const INTENTS: &str = "Billing,Why is my bill high\nBilling,Charged twice\n\
                           Outage,Internet is down\nOutage,No signal\n";

    fn classifier_with(store: MemoryObjectStore, model: Arc<FakeGenerator>) -> IntentClassifier {
        let config = ClassifierConfig {
            model_id: "amazon.titan-text-express-v1".to_string(),
            intents_bucket: "amelia-data".to_string(),
            intents_key: "intents.csv".to_string(),
            ..Default::default()
        };
        IntentClassifier::new(Arc::new(store), model, &config)
    }

    fn classifier(model: Arc<FakeGenerator>) -> IntentClassifier {
        classifier_with(
            MemoryObjectStore::default().with_object("amelia-data", "intents.csv", INTENTS),
            model,
        )
    }

    #[tokio::test]
    async fn missing_utterance_is_bad_request() {
        let model = Arc::new(FakeGenerator::replying("Billing"));
        let classifier = classifier(Arc::clone(&model));

        for body in [r#"{}"#, r#"{"utterance": ""}"#, r#"{"intents": ["Billing"]}"#] {
            let response = handle_classify(
                &classifier,
                ClassifierVariant::Catalog,
                &ApiGatewayRequest::with_body(body),
            )
            .await;
            assert_eq!(response.status_code, 400, "body {body}");
            assert!(response.json().unwrap().get("message").is_some());
        }
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn absent_body_is_treated_as_empty_object() {
        let classifier = classifier(Arc::new(FakeGenerator::replying("Billing")));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::default(),
        )
        .await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn scoped_variant_requires_intents() {
        let classifier = classifier(Arc::new(FakeGenerator::replying("Billing")));

        for body in [r#"{"utterance": "hi"}"#, r#"{"utterance": "hi", "intents": []}"#] {
            let response = handle_classify(
                &classifier,
                ClassifierVariant::Scoped,
                &ApiGatewayRequest::with_body(body),
            )
            .await;
            assert_eq!(response.status_code, 400);
            assert_eq!(
                response.json().unwrap()["message"],
                "Utterance and intents are required"
            );
        }
    }

    #[tokio::test]
    async fn success_returns_exactly_utterance_and_intent() {
        let classifier = classifier(Arc::new(FakeGenerator::replying(" utterance == Billing ")));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::with_body(r#"{"utterance": "my bill doubled"}"#),
        )
        .await;

        assert_eq!(response.status_code, 200);
        let body = response.json().unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(body["utterance"], "my bill doubled");
        assert_eq!(body["intent"], "Billing");
    }

    #[tokio::test]
    async fn scoped_variant_prompts_only_selected_intents() {
        let model = Arc::new(FakeGenerator::replying("utterance == Outage"));
        let classifier = classifier(Arc::clone(&model));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Scoped,
            &ApiGatewayRequest::with_body(r#"{"utterance": "no wifi", "intents": ["Outage"]}"#),
        )
        .await;

        assert_eq!(response.status_code, 200);
        let prompt = &model.requests()[0].input_text;
        assert!(prompt.contains("Outage:\n"));
        assert!(!prompt.contains("Billing:\n"));
    }

    #[tokio::test]
    async fn catalog_variant_ignores_intents_field() {
        let model = Arc::new(FakeGenerator::replying("Billing"));
        let classifier = classifier(Arc::clone(&model));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::with_body(r#"{"utterance": "hi", "intents": ["Outage"]}"#),
        )
        .await;

        assert_eq!(response.status_code, 200);
        assert!(model.requests()[0].input_text.contains("Billing:\n"));
    }

    #[tokio::test]
    async fn missing_reference_data_is_server_error() {
        let classifier = classifier_with(
            MemoryObjectStore::default(),
            Arc::new(FakeGenerator::replying("Billing")),
        );

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::with_body(r#"{"utterance": "hi"}"#),
        )
        .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.json().unwrap()["message"], LOAD_FAILED);
    }

    #[tokio::test]
    async fn unknown_selected_intents_is_server_error() {
        let classifier = classifier(Arc::new(FakeGenerator::replying("Billing")));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Scoped,
            &ApiGatewayRequest::with_body(r#"{"utterance": "hi", "intents": ["Nope"]}"#),
        )
        .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.json().unwrap()["message"], LOAD_FAILED);
    }

    #[tokio::test]
    async fn model_failure_is_internal_error_with_detail() {
        let classifier = classifier(Arc::new(FakeGenerator::failing()));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::with_body(r#"{"utterance": "hi"}"#),
        )
        .await;

        assert_eq!(response.status_code, 500);
        let body = response.json().unwrap();
        assert_eq!(body["message"], "Internal server error");
        assert!(body["error"].as_str().unwrap().contains("AccessDeniedException"));
    }

    #[tokio::test]
    async fn wrong_typed_fields_are_bad_request() {
        let model = Arc::new(FakeGenerator::replying("Billing"));
        let classifier = classifier(Arc::clone(&model));

        for (variant, body) in [
            (ClassifierVariant::Catalog, r#"{"utterance": 5}"#),
            (ClassifierVariant::Scoped, r#"{"utterance": "hi", "intents": "Billing"}"#),
            (ClassifierVariant::Scoped, r#"{"utterance": "hi", "intents": [1, 2]}"#),
        ] {
            let response =
                handle_classify(&classifier, variant, &ApiGatewayRequest::with_body(body)).await;
            assert_eq!(response.status_code, 400, "body {body}");
            assert_eq!(
                response.json().unwrap()["message"],
                variant.missing_fields_message()
            );
        }
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_internal_error() {
        let classifier = classifier(Arc::new(FakeGenerator::replying("Billing")));

        let response = handle_classify(
            &classifier,
            ClassifierVariant::Catalog,
            &ApiGatewayRequest::with_body("utterance=hi"),
        )
        .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.json().unwrap()["message"], "Internal server error");
    }
}
