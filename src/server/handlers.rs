use super::types::{ErrorResponse, HealthResponse, ProxyRequest, RequestKind};
use crate::{
    Error, Result,
    config::UpstreamConfig,
    upstream::{GenerativeClient, UpstreamReply, UpstreamRequest},
};
use axum::{
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamConfig>,
    pub client: Arc<dyn GenerativeClient>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

/// Single entry point: every method on every path lands here.
///
/// The body is extracted fallibly so that an oversized or unreadable body on a
/// submission still ends in a JSON error, after the secret check.
pub async fn relay(
    State(state): State<AppState>,
    method: Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("relay", %request_id, %method);

    async move {
        match RequestKind::classify(&method) {
            RequestKind::Preflight => preflight(),
            RequestKind::HealthCheck => health_check(),
            RequestKind::Unsupported => {
                warn!("Rejecting unsupported method");
                Error::MethodNotAllowed.into_response()
            }
            RequestKind::Submit => match submit(&state, body).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Submission failed: {}", e);
                    e.into_response()
                }
            },
        }
    }
    .instrument(span)
    .await
}

fn preflight() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

fn health_check() -> Response {
    let body = HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    (StatusCode::OK, Json(body)).into_response()
}

async fn submit(
    state: &AppState,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let config = state.upstream.as_ref();
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| Error::MissingApiKey {
            env_var: config.api_key_env.clone(),
        })?;

    let body = body?;
    let request = ProxyRequest::from_body(&body)?;
    let model = select_model(config, request.model.as_deref())?;
    let upstream_request = UpstreamRequest::new(request.contents, request.generation_config);

    info!(
        "Forwarding {} content entries to model {}",
        upstream_request.contents.len(),
        model
    );

    match state
        .client
        .generate_content(model, api_key, &upstream_request)
        .await?
    {
        UpstreamReply::Success(bytes) => Ok(Response::new(Body::from(bytes))),
        UpstreamReply::Failure { status, body } => Err(Error::Upstream {
            status,
            details: body,
        }),
    }
}

/// Caller's model, or the configured default. Identifiers end up in the URL
/// path, so anything outside `[A-Za-z0-9._-]` is refused.
fn select_model<'a>(config: &'a UpstreamConfig, requested: Option<&'a str>) -> Result<&'a str> {
    let Some(model) = requested else {
        return Ok(&config.default_model);
    };

    let well_formed = !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !well_formed {
        return Err(Error::ModelNotAllowed(model.to_string()));
    }

    if !config.allowed_models.is_empty() && !config.allowed_models.iter().any(|m| m == model) {
        return Err(Error::ModelNotAllowed(model.to_string()));
    }

    Ok(model)
}
