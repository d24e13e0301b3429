//! Configuration module for the cart quoting service
//!
//! This module handles loading and validating configuration from environment
//! variables, providing strongly-typed configuration structures for all
//! application components. Courier API keys are required: a missing key fails
//! at startup rather than at first use.

use envconfig::Envconfig;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main configuration structure for the cart quoting service
#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    /// Server configuration
    #[envconfig(nested)]
    pub server: ServerConfig,

    /// Product catalog configuration
    #[envconfig(nested)]
    pub catalog: CatalogConfig,

    /// Courier configuration
    #[envconfig(nested)]
    pub couriers: CourierConfig,
}

/// Server configuration
#[derive(Debug, Clone, Envconfig)]
pub struct ServerConfig {
    /// Host to bind to
    #[envconfig(from = "HOST", default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[envconfig(from = "PORT", default = "8080")]
    pub port: u16,

    /// Log level
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Environment (development, staging, production)
    #[envconfig(from = "ENVIRONMENT", default = "development")]
    pub environment: String,

    /// Request timeout in seconds
    #[envconfig(from = "REQUEST_TIMEOUT_SECS", default = "30")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[envconfig(from = "SHUTDOWN_TIMEOUT_SECS", default = "30")]
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Product catalog configuration
#[derive(Debug, Clone, Envconfig)]
pub struct CatalogConfig {
    /// Base URL of the catalog API
    #[envconfig(from = "CATALOG_BASE_URL", default = "https://dummyjson.com")]
    pub base_url: String,

    /// Page size for catalog pagination
    #[envconfig(from = "CATALOG_PAGE_SIZE", default = "10")]
    pub page_size: u32,

    /// Timeout per catalog page request in seconds
    #[envconfig(from = "CATALOG_TIMEOUT_SECS", default = "10")]
    pub request_timeout_secs: u64,

    /// How long a fetched catalog snapshot may be served, in seconds.
    /// 0 disables caching and refetches on every request.
    #[envconfig(from = "CATALOG_CACHE_TTL_SECS", default = "60")]
    pub cache_ttl_secs: u64,
}

impl CatalogConfig {
    /// Get the per-page request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the cache TTL as Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Courier configuration
///
/// The API keys carry no defaults on purpose: `Config::from_env` fails when
/// either is absent.
#[derive(Debug, Clone, Envconfig)]
pub struct CourierConfig {
    /// TraeloYa tarification endpoint
    #[envconfig(
        from = "TRAELO_YA_URL",
        default = "https://recruitment.weflapp.com/tarifier/traelo_ya"
    )]
    pub traelo_ya_url: String,

    /// TraeloYa API key
    #[envconfig(from = "FLAPP_API_KEY_TRAELO_YA")]
    pub traelo_ya_api_key: String,

    /// Uder tarification endpoint
    #[envconfig(
        from = "UDER_URL",
        default = "https://recruitment.weflapp.com/tarifier/uder"
    )]
    pub uder_url: String,

    /// Uder API key
    #[envconfig(from = "FLAPP_API_KEY_UDER")]
    pub uder_api_key: String,

    /// Timeout per courier request in seconds
    #[envconfig(from = "COURIER_TIMEOUT_SECS", default = "10")]
    pub request_timeout_secs: u64,
}

impl CourierConfig {
    /// Get the per-call request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Mask a secret for logging, keeping only a short prefix
fn masked_key(key: &str) -> String {
    if key.len() <= 4 {
        "***".to_string()
    } else {
        format!("{}***", &key[..4])
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenv::dotenv().ok();

        // Parse configuration from environment
        Config::init_from_env().map_err(Error::from)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("Server port cannot be 0"));
        }

        if self.catalog.base_url.is_empty() {
            return Err(Error::config("Catalog base URL cannot be empty"));
        }

        if self.catalog.page_size == 0 {
            return Err(Error::config("Catalog page size must be at least 1"));
        }

        if self.couriers.traelo_ya_api_key.trim().is_empty() {
            return Err(Error::config("TraeloYa API key cannot be empty"));
        }

        if self.couriers.uder_api_key.trim().is_empty() {
            return Err(Error::config("Uder API key cannot be empty"));
        }

        if self.couriers.traelo_ya_url.is_empty() || self.couriers.uder_url.is_empty() {
            return Err(Error::config("Courier URLs cannot be empty"));
        }

        Ok(())
    }

    /// Log configuration (with API keys masked)
    pub fn log_config(&self) {
        tracing::info!(
            server_address = %self.server.address(),
            environment = %self.server.environment,
            log_level = %self.server.log_level,
            "Server configuration"
        );

        tracing::info!(
            base_url = %self.catalog.base_url,
            page_size = %self.catalog.page_size,
            cache_ttl_secs = %self.catalog.cache_ttl_secs,
            "Catalog configuration"
        );

        tracing::info!(
            traelo_ya_url = %self.couriers.traelo_ya_url,
            traelo_ya_api_key = %masked_key(&self.couriers.traelo_ya_api_key),
            uder_url = %self.couriers.uder_url,
            uder_api_key = %masked_key(&self.couriers.uder_api_key),
            timeout_secs = %self.couriers.request_timeout_secs,
            "Courier configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                environment: "development".to_string(),
                request_timeout_secs: 30,
                shutdown_timeout_secs: 30,
            },
            catalog: CatalogConfig {
                base_url: "https://dummyjson.com".to_string(),
                page_size: 10,
                request_timeout_secs: 10,
                cache_ttl_secs: 60,
            },
            couriers: CourierConfig {
                traelo_ya_url: "https://recruitment.weflapp.com/tarifier/traelo_ya".to_string(),
                traelo_ya_api_key: "traelo-key".to_string(),
                uder_url: "https://recruitment.weflapp.com/tarifier/uder".to_string(),
                uder_api_key: "uder-key".to_string(),
                request_timeout_secs: 10,
            },
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = test_config();
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert!(config.server.is_development());
        assert!(!config.server.is_production());
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = test_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_keys_rejected() {
        let mut config = test_config();
        config.couriers.traelo_ya_api_key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.couriers.uder_api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = test_config();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_key_masking() {
        assert_eq!(masked_key("abcdef123456"), "abcd***");
        assert_eq!(masked_key("ab"), "***");
    }

    #[test]
    fn test_durations() {
        let config = test_config();
        assert_eq!(config.catalog.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.catalog.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.couriers.request_timeout(), Duration::from_secs(10));
    }
}
