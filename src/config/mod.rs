mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration file and applies environment overrides.
pub async fn load() -> Result<Config> {
    load_with(|name| env::var(name).ok()).await
}

/// [`load`] with the environment supplied by `lookup`.
///
/// `CONFIG_PATH` names the YAML file and must exist when set. Without it,
/// `config.yaml` is read when present and built-in defaults are used otherwise.
/// The API key comes from the variable named by `upstream.api_key_env`, and
/// `PORT` overrides the listen port.
pub async fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup("CONFIG_PATH") {
        Some(path) => from_file(&path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => from_file(DEFAULT_CONFIG_PATH).await?,
        None => {
            debug!("No configuration file found, using defaults");
            Config::default()
        }
    };

    let env_key = lookup(&config.upstream.api_key_env);
    config.upstream.api_key = resolve_api_key(config.upstream.api_key.take(), env_key);
    if config.upstream.api_key.is_none() {
        warn!(
            "{} is not set; submissions will be rejected",
            config.upstream.api_key_env
        );
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(config)
}

/// Reads a YAML configuration file.
pub async fn from_file(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml(&config_str)
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an all-default map.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Picks the API key, preferring the environment over the file. Blank values count as unset.
pub fn resolve_api_key(file_value: Option<String>, env_value: Option<String>) -> Option<String> {
    env_value
        .filter(|key| !key.trim().is_empty())
        .or_else(|| file_value.filter(|key| !key.trim().is_empty()))
}
