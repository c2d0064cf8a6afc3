/// Configuration management for the site encoder
use crate::error::{EncoderError, EncoderResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Search Console endpoint listing the caller's verified properties
pub const DEFAULT_SITES_API_URL: &str = "https://searchconsole.googleapis.com/webmasters/v3/sites";

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
    pub version: String,
}

/// Property-listing API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full URL of the sites list endpoint
    pub sites_api_url: String,
    /// Bound on the single outbound call, in seconds
    pub timeout_secs: u64,
    /// User-Agent header for outbound requests
    pub user_agent: String,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> EncoderResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> EncoderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let version = env!("CARGO_PKG_VERSION").to_string();

        let hostname = lookup("ENCODER_HOSTNAME").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("ENCODER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| EncoderError::Config("Invalid port number".to_string()))?;

        let sites_api_url =
            lookup("ENCODER_SITES_API_URL").unwrap_or_else(|| DEFAULT_SITES_API_URL.to_string());
        let timeout_secs = lookup("ENCODER_UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| EncoderError::Config("Invalid upstream timeout".to_string()))?;
        let user_agent = lookup("ENCODER_USER_AGENT")
            .unwrap_or_else(|| format!("site-encoder/{}", version));

        let level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let format = match lookup("ENCODER_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(EncoderError::Config(format!(
                    "Unknown log format '{}', expected 'pretty' or 'json'",
                    other
                )))
            }
        };

        Ok(ServerConfig {
            service: ServiceConfig {
                hostname,
                port,
                version,
            },
            upstream: UpstreamConfig {
                sites_api_url,
                timeout_secs,
                user_agent,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> EncoderResult<()> {
        if self.service.hostname.is_empty() {
            return Err(EncoderError::Config("Hostname cannot be empty".to_string()));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(EncoderError::Config(
                "Upstream timeout must be at least 1 second".to_string(),
            ));
        }

        let url = &self.upstream.sites_api_url;
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(EncoderError::Config(format!(
                "Sites API URL must be http(s): {}",
                url
            )));
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.hostname, self.service.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> EncoderResult<ServerConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.service.hostname, "0.0.0.0");
        assert_eq!(config.service.port, 3000);
        assert_eq!(config.upstream.sites_api_url, DEFAULT_SITES_API_URL);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.upstream.user_agent.starts_with("site-encoder/"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ENCODER_HOSTNAME", "127.0.0.1"),
            ("ENCODER_PORT", "8080"),
            ("ENCODER_SITES_API_URL", "http://localhost:9999/sites"),
            ("ENCODER_UPSTREAM_TIMEOUT_SECS", "3"),
            ("ENCODER_LOG_FORMAT", "json"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.upstream.sites_api_url, "http://localhost:9999/sites");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = load(&[("ENCODER_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, EncoderError::Config(_)));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(load(&[("ENCODER_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_validation_rules() {
        let mut config = load(&[]).unwrap();
        config.upstream.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = load(&[]).unwrap();
        config.upstream.sites_api_url = "ftp://example.com/sites".to_string();
        assert!(config.validate().is_err());

        let mut config = load(&[]).unwrap();
        config.service.hostname = String::new();
        assert!(config.validate().is_err());
    }
}
