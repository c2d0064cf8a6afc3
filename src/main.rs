/// site-encoder
///
/// Resolves a URL to the matching verified Search Console property and
/// returns it percent-encoded, ready for use in Search Console API paths.

mod api;
mod auth;
mod config;
mod context;
mod error;
mod logging;
mod metrics;
mod properties;
mod resolver;
mod server;

use config::ServerConfig;
use context::AppContext;
use error::EncoderResult;

#[tokio::main]
async fn main() -> EncoderResult<()> {
    // Load configuration (also reads .env, so RUST_LOG from it applies)
    let config = ServerConfig::from_env()?;

    // Initialize logging
    logging::init(&config.logging);

    // Create application context
    let ctx = AppContext::new(config)?;

    // Start server
    server::serve(ctx).await?;

    Ok(())
}
