use anyhow::{Context, Result};
use gemini_relay::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// `RUST_LOG` when set, else the configured level. A bare level is checked
/// up front so a typo fails startup instead of silently logging nothing.
fn log_filter(configured: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    configured.parse::<LevelFilter>().with_context(|| {
        format!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            configured
        )
    })?;
    Ok(EnvFilter::new(configured))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration decides the log level, so it loads before tracing is up
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.server.logs.level)?)
        .json()
        .init();

    info!(
        port = config.server.port,
        model = %config.upstream.default_model,
        "Starting gemini-relay"
    );

    server::run(config).await?;

    Ok(())
}
