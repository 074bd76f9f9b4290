//! Lambda handler logic, independent of the runtime.
//!
//! The binaries in `src/bin/` only wire these functions to
//! `lambda_runtime`; every handler returns a response value and never an
//! error, so invokers always see an HTTP-style status.

pub mod classify;
pub mod load;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use classify::{ClassifierVariant, handle_classify};
pub use load::{LoadRequest, LoadResponse, handle_load, run_load};

/// API Gateway proxy event; only the body is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiGatewayRequest {
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiGatewayRequest {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// API Gateway proxy response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parsed JSON body.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// JSON response with the given status.
pub fn json_response(status_code: u16, body: Value) -> ApiGatewayResponse {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    ApiGatewayResponse {
        status_code,
        headers,
        body: body.to_string(),
    }
}
