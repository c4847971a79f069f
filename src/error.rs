use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

const TRANSPORT_FALLBACK: &str = "Failed to reach upstream API";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server misconfigured: {env_var} is not set")]
    MissingApiKey { env_var: String },

    #[error("Invalid JSON body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Request body must include a 'contents' array")]
    MissingContents,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model not allowed: {0}")]
    ModelNotAllowed(String),

    #[error("Upstream API error: {}", .status.as_u16())]
    Upstream { status: StatusCode, details: String },

    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

// The request URL carries the API key as a query parameter and must never
// reach a response body or a log line.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.without_url().to_string())
    }
}

impl From<axum::extract::rejection::BytesRejection> for Error {
    fn from(rejection: axum::extract::rejection::BytesRejection) -> Self {
        Self::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Transport failure carrying `msg`, or a generic message when it is blank.
    pub fn transport(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() {
            Self::Transport(TRANSPORT_FALLBACK.to_string())
        } else {
            Self::Transport(msg)
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status the relay answers with when this error ends a request.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidJson(_)
            | Self::MissingContents
            | Self::InvalidRequest(_)
            | Self::ModelNotAllowed(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } | Self::BodyRejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Supplementary diagnostic text for the `details` field, if any.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Upstream { details, .. } => Some(details.clone()),
            Self::InvalidJson(e) => Some(e.to_string()),
            _ => None,
        }
    }
}
