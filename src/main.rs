//! Cartquote - a cart quoting service
//!
//! This application accepts a shopping cart, validates it against a remote
//! product catalog, requests shipping quotes from two courier providers, and
//! returns the cheapest valid quote.

use std::sync::Arc;

use cartquote::{
    api::{health::HealthState, AppState},
    catalog::{CachedCatalog, CatalogSource, HttpCatalog},
    config::Config,
    couriers::{CourierClient, QuoteAggregator, TraeloYa, Uder},
    error::Result,
    logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment; missing courier API keys fail here
    let config = Arc::new(Config::from_env()?);

    // Validate configuration
    config.validate()?;

    // Initialize logging/tracing
    logging::init_tracing(&config.server.log_level, &config.server.environment)?;

    // Log configuration (with API keys masked)
    config.log_config();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting cartquote");

    // Catalog source, behind the TTL cache unless caching is disabled
    let http_catalog: Arc<dyn CatalogSource> = Arc::new(HttpCatalog::new(&config.catalog)?);
    let catalog: Arc<dyn CatalogSource> = if config.catalog.cache_ttl_secs > 0 {
        Arc::new(CachedCatalog::new(http_catalog, config.catalog.cache_ttl()))
    } else {
        http_catalog
    };

    // Courier clients in selection priority order
    let couriers: Vec<Arc<dyn CourierClient>> = vec![
        Arc::new(TraeloYa::new(&config.couriers)?),
        Arc::new(Uder::new(&config.couriers)?),
    ];

    let state = AppState {
        catalog,
        quotes: Arc::new(QuoteAggregator::new(couriers)),
        health: Arc::new(HealthState::new()),
    };

    cartquote::api::server::create_server(config, state).await?;

    tracing::info!("Cartquote shutdown complete");
    Ok(())
}
