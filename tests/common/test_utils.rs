use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use gemini_relay::{
    config::{ServerConfig, UpstreamConfig},
    server::{self, handlers::AppState},
    upstream::{GenerativeClient, HttpGenerativeClient},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

/// Upstream configuration pointing at `base_url` with a key configured
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        ..UpstreamConfig::default()
    }
}

/// Router backed by a real HTTP client
pub fn http_app(config: UpstreamConfig) -> Router {
    let client = HttpGenerativeClient::new(&config);
    app_with_client(config, Arc::new(client))
}

pub fn app_with_client(config: UpstreamConfig, client: Arc<dyn GenerativeClient>) -> Router {
    app_with_limit(config, client, ServerConfig::default().max_body_bytes)
}

pub fn app_with_limit(
    config: UpstreamConfig,
    client: Arc<dyn GenerativeClient>,
    max_body_bytes: usize,
) -> Router {
    server::router(
        AppState {
            upstream: Arc::new(config),
            client,
        },
        max_body_bytes,
    )
}

pub fn request(method: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Sends one request through the router and returns status, raw body and response
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>, Response<()>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    (parts.status, bytes.to_vec(), Response::from_parts(parts, ()))
}

pub fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body is JSON")
}

/// Asserts the fixed cross-origin header set
pub fn assert_cors_headers<T>(response: &Response<T>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST,OPTIONS,GET");
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
    assert_eq!(headers["content-type"], "application/json");
}
