use crate::{Error, Result};
use axum::http::Method;
use serde::Serialize;
use serde_json::{Map, Value};

/// How an inbound request is handled, decided by its method alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Preflight,
    HealthCheck,
    Submit,
    Unsupported,
}

impl RequestKind {
    pub fn classify(method: &Method) -> Self {
        if method == Method::OPTIONS {
            Self::Preflight
        } else if method == Method::GET {
            Self::HealthCheck
        } else if method == Method::POST {
            Self::Submit
        } else {
            Self::Unsupported
        }
    }
}

/// A validated submission body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub contents: Vec<Value>,
    pub model: Option<String>,
    pub generation_config: Option<Value>,
}

impl ProxyRequest {
    /// Parses and validates a raw body. An empty body is read as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body).map_err(Error::InvalidJson)?
        };

        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(Error::MissingContents);
        };

        let contents = match fields.remove("contents") {
            Some(Value::Array(contents)) => contents,
            _ => return Err(Error::MissingContents),
        };

        let model = match fields.remove("model") {
            None | Some(Value::Null) => None,
            Some(Value::String(model)) => Some(model),
            Some(_) => return Err(Error::invalid_request("'model' must be a string")),
        };

        let generation_config = match fields.remove("generationConfig") {
            None | Some(Value::Null) => None,
            Some(config @ Value::Object(_)) => Some(config),
            Some(_) => {
                return Err(Error::invalid_request(
                    "'generationConfig' must be an object",
                ));
            }
        };

        Ok(Self {
            contents,
            model,
            generation_config,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
