//! API module for the cart quoting service
//!
//! This module contains all HTTP API endpoints and server setup,
//! including the cart quoting endpoint, health checks, and middleware.

pub mod cart;
pub mod health;
pub mod server;

pub use cart::quote_cart;
pub use health::{build_info, health_check, ready_check};
pub use server::{create_router, create_server, shutdown_signal};

use std::sync::Arc;

use crate::catalog::CatalogSource;
use crate::couriers::QuoteAggregator;
use health::HealthState;

/// Shared application state for the cart endpoint
#[derive(Clone)]
pub struct AppState {
    /// Catalog source (HTTP client, usually behind the TTL cache)
    pub catalog: Arc<dyn CatalogSource>,

    /// Courier quote aggregator
    pub quotes: Arc<QuoteAggregator>,

    /// Component health tracking, fed by the background monitor
    pub health: Arc<HealthState>,
}

/// API version constant
pub const API_VERSION: &str = "v1";

/// Build information populated at compile time
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    api_version: API_VERSION,
    commit: match option_env!("GIT_COMMIT") {
        Some(v) => v,
        None => "unknown",
    },
    build_time: match option_env!("BUILD_TIME") {
        Some(v) => v,
        None => "unknown",
    },
    rust_version: match option_env!("RUSTC_VERSION") {
        Some(v) => v,
        None => "unknown",
    },
};

/// Build information structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Application version from Cargo.toml
    pub version: &'static str,
    /// API version served by this build
    pub api_version: &'static str,
    /// Git commit hash
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Rust version used for compilation
    pub rust_version: &'static str,
}

/// Health check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,
    /// Optional message
    pub message: Option<String>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Ready check response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status
    pub status: HealthStatus,
    /// Individual component checks
    pub checks: std::collections::HashMap<String, ComponentHealth>,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Component health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ComponentHealth {
    /// Component status
    pub status: HealthStatus,
    /// Optional error message
    pub message: Option<String>,
    /// Last check timestamp
    pub last_check: chrono::DateTime<chrono::Utc>,
}

/// Health status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is degraded but operational
    Degraded,
    /// Service is unhealthy
    Unhealthy,
}

impl HealthStatus {
    /// Check if the status is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Convert to HTTP status code
    pub fn to_status_code(&self) -> axum::http::StatusCode {
        match self {
            HealthStatus::Healthy => axum::http::StatusCode::OK,
            HealthStatus::Degraded => axum::http::StatusCode::OK,
            HealthStatus::Unhealthy => axum::http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(!HealthStatus::Unhealthy.is_healthy());

        assert_eq!(
            HealthStatus::Healthy.to_status_code(),
            axum::http::StatusCode::OK
        );
        assert_eq!(
            HealthStatus::Unhealthy.to_status_code(),
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_build_info() {
        assert!(!BUILD_INFO.version.is_empty());
        assert!(!BUILD_INFO.rust_version.is_empty());
        assert_eq!(BUILD_INFO.api_version, API_VERSION);

        let json = serde_json::to_value(BUILD_INFO).unwrap();
        assert_eq!(json["api_version"], API_VERSION);
    }
}
