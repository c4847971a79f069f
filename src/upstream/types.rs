use axum::body::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling parameters sent when the caller supplies none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRequest {
    pub contents: Vec<Value>,
    pub generation_config: Value,
}

impl UpstreamRequest {
    /// Copies `contents` verbatim and falls back to [`GenerationConfig::default`].
    pub fn new(contents: Vec<Value>, generation_config: Option<Value>) -> Self {
        let generation_config = generation_config.unwrap_or_else(|| {
            serde_json::to_value(GenerationConfig::default()).unwrap_or(Value::Null)
        });

        Self {
            contents,
            generation_config,
        }
    }
}

/// What the upstream API answered, for any status it answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    Success(Bytes),
    Failure { status: StatusCode, body: String },
}
