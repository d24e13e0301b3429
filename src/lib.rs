//! Cartquote Library
//!
//! This library exposes the core modules of the cart quoting service for use
//! in integration tests and as a library for other applications.

pub mod api;
pub mod catalog;
pub mod config;
pub mod couriers;
pub mod error;
pub mod logging;
pub mod models;
pub mod reconcile;
pub mod test_utils;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{Error, Result};

// Re-export model types
pub use models::{CartRequest, CatalogProduct, CustomerData, LineItem, ProcessedLine};

// Re-export API server functions
pub use api::server::{create_router, create_server, shutdown_signal};

// Re-export collaborator seams
pub use catalog::CatalogSource;
pub use couriers::{CourierClient, QuoteAggregator, SelectedQuote};
