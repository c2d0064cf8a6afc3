/// Verified Property Source
///
/// Lists the properties a bearer credential has verified in Search Console.
/// The resolver only depends on the `PropertySource` trait so the HTTP
/// client can be swapped for an in-memory list.

pub mod client;

#[cfg(test)]
pub mod fake;

pub use client::SearchConsoleClient;

use crate::error::EncoderResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Property listing backend trait
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// List every property visible to `token`
    async fn list_properties(&self, token: &str) -> EncoderResult<Vec<SiteEntry>>;
}

/// One verified property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    /// URL-prefix (`https://example.com/`) or domain (`sc-domain:example.com`) identifier
    pub site_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_level: Option<String>,
}

impl SiteEntry {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            permission_level: None,
        }
    }
}

/// Body of the sites list endpoint.
///
/// `siteEntry` is required; a body without it fails to parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteList {
    pub site_entry: Vec<SiteEntry>,
}
