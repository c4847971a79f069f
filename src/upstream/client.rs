use super::types::*;
use crate::{Error, Result, config::UpstreamConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply>;
}

/// `generateContent` client over plain HTTP.
pub struct HttpGenerativeClient {
    client: Client,
    base_url: String,
    api_version: String,
    timeout: Option<Duration>,
}

impl HttpGenerativeClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: &UpstreamConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.trim_matches('/').to_string(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Endpoint for `model`, without the `key` query parameter.
    pub fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, self.api_version, model
        )
    }
}

#[async_trait]
impl GenerativeClient for HttpGenerativeClient {
    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply> {
        let url = self.endpoint_url(model);
        debug!(
            "Calling generateContent on {} with {} content entries",
            url,
            request.contents.len()
        );

        let mut builder = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            error!("Failed to send request to upstream API: {}", e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            error!("Upstream API error (status {}): {}", status, body);
            return Ok(UpstreamReply::Failure { status, body });
        }

        let body = response.bytes().await?;
        debug!("Upstream API answered {} with {} bytes", status, body.len());
        Ok(UpstreamReply::Success(body))
    }
}
