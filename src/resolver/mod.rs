/// URL to verified-property resolution
///
/// Normalises the caller's URL, then tries, in order:
/// 1. an exact (case-insensitive) match against the listed properties
/// 2. the `sc-domain:` property covering the URL's domain
///
/// Every outcome carries an encoded URL; failures only add a warning.

pub mod normalize;

pub use normalize::{normalize_url, percent_encode};

use crate::{metrics, properties::PropertySource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a listed property was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    DomainProperty,
}

/// Why ownership could not be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    MissingCredential,
    UpstreamUnavailable,
}

impl Warning {
    pub fn message(self) -> &'static str {
        match self {
            Warning::MissingCredential => "Ownership not verified: no bearer token supplied",
            Warning::UpstreamUnavailable => {
                "Ownership not verified: could not fetch verified properties"
            }
        }
    }
}

/// Outcome of resolving one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A listed property matched
    Matched {
        site_url: String,
        encoded_url: String,
        kind: MatchKind,
    },
    /// The list was fetched but nothing matched; the normalised input stands
    Unmatched { site_url: String, encoded_url: String },
    /// Ownership was never checked; the normalised input stands
    Unverified {
        site_url: String,
        encoded_url: String,
        warning: Warning,
    },
}

impl Resolution {
    fn fallback(normalized: &str) -> (String, String) {
        (normalized.to_string(), percent_encode(normalized))
    }

    fn matched(site_url: &str, kind: MatchKind) -> Self {
        Resolution::Matched {
            site_url: site_url.to_string(),
            encoded_url: percent_encode(site_url),
            kind,
        }
    }

    fn unmatched(normalized: &str) -> Self {
        let (site_url, encoded_url) = Self::fallback(normalized);
        Resolution::Unmatched {
            site_url,
            encoded_url,
        }
    }

    fn unverified(normalized: &str, warning: Warning) -> Self {
        let (site_url, encoded_url) = Self::fallback(normalized);
        Resolution::Unverified {
            site_url,
            encoded_url,
            warning,
        }
    }

    /// Label used for logging and the `resolutions_total` metric
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Matched {
                kind: MatchKind::Exact,
                ..
            } => "exact",
            Resolution::Matched {
                kind: MatchKind::DomainProperty,
                ..
            } => "domain_property",
            Resolution::Unmatched { .. } => "unmatched",
            Resolution::Unverified { .. } => "unverified",
        }
    }

    pub fn site_url(&self) -> &str {
        match self {
            Resolution::Matched { site_url, .. }
            | Resolution::Unmatched { site_url, .. }
            | Resolution::Unverified { site_url, .. } => site_url,
        }
    }

    pub fn encoded_url(&self) -> &str {
        match self {
            Resolution::Matched { encoded_url, .. }
            | Resolution::Unmatched { encoded_url, .. }
            | Resolution::Unverified { encoded_url, .. } => encoded_url,
        }
    }

    pub fn warning(&self) -> Option<Warning> {
        match self {
            Resolution::Unverified { warning, .. } => Some(*warning),
            _ => None,
        }
    }
}

/// JSON body of a successful `/encode` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    pub encoded_url: String,
    pub site_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<Resolution> for EncodeResponse {
    fn from(resolution: Resolution) -> Self {
        let warning = resolution.warning().map(|w| w.message().to_string());
        match resolution {
            Resolution::Matched {
                site_url,
                encoded_url,
                ..
            }
            | Resolution::Unmatched {
                site_url,
                encoded_url,
            }
            | Resolution::Unverified {
                site_url,
                encoded_url,
                ..
            } => EncodeResponse {
                encoded_url,
                site_url,
                warning,
            },
        }
    }
}

/// Resolves normalised URLs against a property source
#[derive(Clone)]
pub struct Resolver {
    properties: Arc<dyn PropertySource>,
}

impl Resolver {
    pub fn new(properties: Arc<dyn PropertySource>) -> Self {
        Self { properties }
    }

    /// Resolve an already-normalised URL.
    ///
    /// Without a token the property source is not consulted.
    pub async fn resolve(&self, normalized: &str, token: Option<&str>) -> Resolution {
        let resolution = match token {
            None => Resolution::unverified(normalized, Warning::MissingCredential),
            Some(token) => self.resolve_with_token(normalized, token).await,
        };

        metrics::record_resolution(resolution.outcome());
        debug!(
            "Resolved '{}' -> '{}' ({})",
            normalized,
            resolution.site_url(),
            resolution.outcome()
        );

        resolution
    }

    async fn resolve_with_token(&self, normalized: &str, token: &str) -> Resolution {
        let entries = match self.properties.list_properties(token).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Falling back to unverified URL for '{}': {}", normalized, e);
                return Resolution::unverified(normalized, Warning::UpstreamUnavailable);
            }
        };

        if let Some(entry) = normalize::find_exact(&entries, normalized) {
            return Resolution::matched(&entry.site_url, MatchKind::Exact);
        }

        if let Some(entry) = normalize::find_domain_property(&entries, normalized) {
            return Resolution::matched(&entry.site_url, MatchKind::DomainProperty);
        }

        info!(
            "No verified property among {} matched '{}'",
            entries.len(),
            normalized
        );
        Resolution::unmatched(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::fake::StaticPropertySource;

    fn resolver(source: StaticPropertySource) -> (Resolver, Arc<StaticPropertySource>) {
        let source = Arc::new(source);
        (Resolver::new(source.clone()), source)
    }

    #[tokio::test]
    async fn test_no_token_skips_upstream() {
        let (resolver, source) = resolver(StaticPropertySource::with_sites(&["https://example.com/"]));

        let resolution = resolver.resolve("https://example.com/", None).await;

        assert_eq!(source.calls(), 0);
        assert_eq!(resolution.warning(), Some(Warning::MissingCredential));
        assert_eq!(resolution.site_url(), "https://example.com/");
        assert_eq!(resolution.encoded_url(), "https%3A%2F%2Fexample.com%2F");
    }

    #[tokio::test]
    async fn test_exact_match() {
        let (resolver, _) = resolver(StaticPropertySource::with_sites(&[
            "sc-domain:example.com",
            "https://example.com/",
        ]));

        let resolution = resolver.resolve("https://example.com/", Some("t")).await;

        assert_eq!(
            resolution,
            Resolution::Matched {
                site_url: "https://example.com/".to_string(),
                encoded_url: "https%3A%2F%2Fexample.com%2F".to_string(),
                kind: MatchKind::Exact,
            }
        );
    }

    #[tokio::test]
    async fn test_exact_match_keeps_listed_casing() {
        let (resolver, _) = resolver(StaticPropertySource::with_sites(&["https://Example.com/"]));

        let resolution = resolver.resolve("https://example.com/", Some("t")).await;

        assert_eq!(resolution.site_url(), "https://Example.com/");
        assert_eq!(resolution.encoded_url(), "https%3A%2F%2FExample.com%2F");
    }

    #[tokio::test]
    async fn test_domain_property_fallback() {
        let (resolver, _) = resolver(StaticPropertySource::with_sites(&["sc-domain:example.com"]));

        let resolution = resolver
            .resolve("https://www.example.com/page", Some("t"))
            .await;

        assert_eq!(resolution.outcome(), "domain_property");
        assert_eq!(resolution.site_url(), "sc-domain:example.com");
        assert_eq!(resolution.encoded_url(), "sc-domain%3Aexample.com");
        assert_eq!(resolution.warning(), None);
    }

    #[tokio::test]
    async fn test_no_match_keeps_input_without_warning() {
        let (resolver, _) = resolver(StaticPropertySource::with_sites(&["https://other.com/"]));

        let resolution = resolver.resolve("https://example.com/", Some("t")).await;

        assert_eq!(resolution.outcome(), "unmatched");
        assert_eq!(resolution.site_url(), "https://example.com/");
        assert_eq!(resolution.warning(), None);
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_warning() {
        let (resolver, source) = resolver(StaticPropertySource::failing());

        let resolution = resolver.resolve("https://example.com/", Some("t")).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(resolution.warning(), Some(Warning::UpstreamUnavailable));
        assert_eq!(resolution.site_url(), "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let (resolver, _) = resolver(StaticPropertySource::with_sites(&["sc-domain:example.com"]));

        let first = resolver.resolve("https://example.com/a", Some("t")).await;
        let second = resolver.resolve("https://example.com/a", Some("t")).await;

        assert_eq!(first, second);
    }

    #[test]
    fn test_response_serialization() {
        let body = serde_json::to_value(EncodeResponse::from(Resolution::unverified(
            "https://example.com/",
            Warning::MissingCredential,
        )))
        .unwrap();
        assert_eq!(body["siteUrl"], "https://example.com/");
        assert_eq!(body["encodedUrl"], "https%3A%2F%2Fexample.com%2F");
        assert!(body["warning"].is_string());

        let body = serde_json::to_value(EncodeResponse::from(Resolution::unmatched(
            "https://example.com/",
        )))
        .unwrap();
        assert!(body.get("warning").is_none());
    }
}
