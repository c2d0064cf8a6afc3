/// Application context and dependency injection
use crate::{
    config::ServerConfig,
    error::EncoderResult,
    properties::{PropertySource, SearchConsoleClient},
    resolver::Resolver,
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub resolver: Resolver,
}

impl AppContext {
    /// Create a new application context backed by the Search Console API
    pub fn new(config: ServerConfig) -> EncoderResult<Self> {
        // Validate configuration
        config.validate()?;

        let client = SearchConsoleClient::new(&config.upstream)?;

        Ok(Self::with_property_source(config, Arc::new(client)))
    }

    /// Create a context around any property source
    pub fn with_property_source(config: ServerConfig, properties: Arc<dyn PropertySource>) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Resolver::new(properties),
        }
    }
}
