/// In-memory property source for tests
use crate::{
    error::{EncoderError, EncoderResult},
    properties::{PropertySource, SiteEntry},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns a fixed list, or a fixed failure
pub struct StaticPropertySource {
    entries: Option<Vec<SiteEntry>>,
    calls: AtomicUsize,
}

impl StaticPropertySource {
    pub fn with_sites(sites: &[&str]) -> Self {
        Self {
            entries: Some(sites.iter().map(|s| SiteEntry::new(*s)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PropertySource for StaticPropertySource {
    async fn list_properties(&self, _token: &str) -> EncoderResult<Vec<SiteEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .clone()
            .ok_or_else(|| EncoderError::Upstream("Sites API returned 503".to_string()))
    }
}
