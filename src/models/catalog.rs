//! Catalog product models
//!
//! Products sourced from the remote catalog API, and the per-line processing
//! result used for stock reconciliation. The availability check uses the
//! adjusted "stock real" figure `floor(stock / rating)` instead of raw stock.

use serde::{Deserialize, Serialize};

/// A product record from the remote catalog. Read-only within a request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogProduct {
    /// Catalog product id (numeric upstream, compared as string to cart ids)
    pub id: i64,

    /// Product title
    pub title: String,

    /// Raw stock figure
    #[serde(default)]
    pub stock: u32,

    /// Product rating; the catalog reports values in (0, 5]
    #[serde(default = "default_rating")]
    pub rating: f64,
}

fn default_rating() -> f64 {
    1.0
}

/// Adjusted available-stock figure: `floor(stock / rating)`.
///
/// A rating of zero or below (or a non-finite one) yields 0, treating the
/// product as out of stock. The result is never negative.
pub fn stock_real(stock: u32, rating: f64) -> i64 {
    if rating > 0.0 && rating.is_finite() {
        (f64::from(stock) / rating).floor() as i64
    } else {
        0
    }
}

/// A cart line resolved against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedLine {
    /// Requested product id (as sent by the client)
    pub id: String,

    /// Product name from the catalog
    pub name: String,

    /// Unit price from the cart request
    pub price_per_unit: f64,

    /// Discount from the cart request (passthrough, never applied)
    pub discount: f64,

    /// Quantity requested in the cart
    pub quantity_requested: i64,

    /// Raw stock obtained from the catalog (St)
    pub stock_obtained: u32,

    /// Rating obtained from the catalog (r)
    pub rating: f64,

    /// Adjusted stock figure (Sr)
    pub stock_real: i64,
}
