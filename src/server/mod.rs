pub mod cors;
pub mod handlers;
pub mod types;

use crate::{Result, config::Config, upstream::HttpGenerativeClient};
use axum::{Router, extract::DefaultBodyLimit, middleware, routing::any};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the relay router. Any path and any method reach the same handler.
///
/// The fixed header set is applied router-wide so that responses produced
/// outside the handler carry it too.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(handlers::relay))
        .fallback(handlers::relay)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::map_response(cors::set_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = HttpGenerativeClient::new(&config.upstream);

    let app_state = AppState {
        upstream: Arc::new(config.upstream.clone()),
        client: Arc::new(client),
    };

    let app = router(app_state, config.server.max_body_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Relaying to {}/{} (default model {})",
        config.upstream.base_url, config.upstream.api_version, config.upstream.default_model
    );
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
