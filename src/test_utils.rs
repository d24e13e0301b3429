//! Test utilities for the cart quoting service
//!
//! This module provides mock implementations of the collaborator traits and
//! factories for test data.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::health::HealthState;
use crate::api::AppState;
use crate::catalog::CatalogSource;
use crate::config::{CatalogConfig, Config, CourierConfig, ServerConfig};
use crate::couriers::{CourierClient, Origin, QuoteAggregator};
use crate::error::{Error, Result};
use crate::models::{stock_real, CartRequest, CatalogProduct, CustomerData, LineItem, ProcessedLine};

/// Mock implementation of CatalogSource for testing
#[derive(Clone, Default)]
pub struct MockCatalog {
    products: Arc<Mutex<Vec<CatalogProduct>>>,
    fail_next: Arc<Mutex<bool>>,
    calls: Arc<AtomicU32>,
}

impl MockCatalog {
    /// Create a mock catalog serving the given products
    pub fn with_products(products: Vec<CatalogProduct>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
            fail_next: Arc::new(Mutex::new(false)),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Configure the mock to fail on the next fetch
    pub fn fail_next_fetch(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    /// Number of fetches issued so far
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch_all(&self) -> Result<Vec<CatalogProduct>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(Error::upstream("Mock catalog outage"));
        }

        Ok(self.products.lock().unwrap().clone())
    }
}

/// Mock implementation of CourierClient for testing
pub struct MockCourier {
    name: &'static str,
    total: Option<f64>,
    calls: Arc<AtomicU32>,
}

impl MockCourier {
    /// A courier that always quotes the given total
    pub fn quoting(name: &'static str, total: f64) -> Self {
        Self {
            name,
            total: Some(total),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A courier that never produces a quote
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            total: None,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Handle for asserting how many quote calls were made
    pub fn call_counter(&self) -> Arc<AtomicU32> {
        self.calls.clone()
    }
}

#[async_trait]
impl CourierClient for MockCourier {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn quote(
        &self,
        _customer: &CustomerData,
        _origin: &Origin,
        _lines: &[ProcessedLine],
    ) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.total
    }
}

/// Create test customer data
pub fn test_customer() -> CustomerData {
    CustomerData {
        name: "Ada Lovelace".to_string(),
        shipping_street: "Av. Providencia 1234".to_string(),
        commune: "Providencia".to_string(),
        phone: "+56912345678".to_string(),
    }
}

/// Create a catalog product with the given stock and rating
pub fn test_product(id: i64, stock: u32, rating: f64) -> CatalogProduct {
    CatalogProduct {
        id,
        title: format!("Product {}", id),
        stock,
        rating,
    }
}

/// Create a cart line for the given product id and quantity
pub fn test_line(product_id: &str, quantity: i64) -> LineItem {
    LineItem {
        product_id: product_id.to_string(),
        price: 10.0,
        quantity,
        discount: 0.0,
    }
}

/// Create a cart request for the given lines
pub fn test_cart(lines: Vec<LineItem>) -> CartRequest {
    CartRequest {
        products: lines,
        customer_data: test_customer(),
    }
}

/// Create a processed line as the reconciler would produce it
pub fn test_processed_line(id: &str, name: &str, quantity: i64) -> ProcessedLine {
    ProcessedLine {
        id: id.to_string(),
        name: name.to_string(),
        price_per_unit: 10.0,
        discount: 0.0,
        quantity_requested: quantity,
        stock_obtained: 20,
        rating: 4.0,
        stock_real: stock_real(20, 4.0),
    }
}

/// Create a test configuration
pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use port 0 for testing
            log_level: "debug".to_string(),
            environment: "test".to_string(),
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        },
        catalog: CatalogConfig {
            base_url: "http://127.0.0.1:0".to_string(),
            page_size: 10,
            request_timeout_secs: 10,
            cache_ttl_secs: 0,
        },
        couriers: CourierConfig {
            traelo_ya_url: "http://127.0.0.1:0/tarifier/traelo_ya".to_string(),
            traelo_ya_api_key: "test-traelo-key".to_string(),
            uder_url: "http://127.0.0.1:0/tarifier/uder".to_string(),
            uder_api_key: "test-uder-key".to_string(),
            request_timeout_secs: 10,
        },
    })
}

/// Create an AppState with a one-product catalog and two quoting couriers
pub fn test_state() -> AppState {
    state_with(
        MockCatalog::with_products(vec![test_product(1, 20, 4.0)]),
        vec![
            MockCourier::quoting("TraeloYa", 5.50),
            MockCourier::quoting("Uder", 7.25),
        ],
    )
}

/// Create an AppState from explicit mocks
pub fn state_with(catalog: MockCatalog, couriers: Vec<MockCourier>) -> AppState {
    AppState {
        catalog: Arc::new(catalog),
        quotes: Arc::new(QuoteAggregator::new(
            couriers
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn CourierClient>)
                .collect(),
        )),
        health: Arc::new(HealthState::new()),
    }
}
