/// Search Console sites list client
use crate::{
    config::UpstreamConfig,
    error::{EncoderError, EncoderResult},
    metrics,
    properties::{PropertySource, SiteEntry, SiteList},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Calls `GET <sites_api_url>` with the caller's bearer token
#[derive(Clone)]
pub struct SearchConsoleClient {
    http_client: Client,
    sites_api_url: String,
}

impl SearchConsoleClient {
    /// Create a new client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> EncoderResult<Self> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EncoderError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            sites_api_url: config.sites_api_url.clone(),
        })
    }
}

#[async_trait]
impl PropertySource for SearchConsoleClient {
    async fn list_properties(&self, token: &str) -> EncoderResult<Vec<SiteEntry>> {
        let response = self
            .http_client
            .get(&self.sites_api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                metrics::record_upstream_request(None);
                EncoderError::Upstream(format!("Failed to reach sites API: {}", e))
            })?;

        let status = response.status();
        metrics::record_upstream_request(Some(status.as_u16()));

        if !status.is_success() {
            warn!("Sites API returned {}", status);
            return Err(EncoderError::Upstream(format!(
                "Sites API returned {}",
                status
            )));
        }

        let list: SiteList = response.json().await.map_err(|e| {
            EncoderError::Upstream(format!("Failed to parse sites list: {}", e))
        })?;

        debug!("Sites API listed {} properties", list.site_entry.len());

        Ok(list.site_entry)
    }
}
