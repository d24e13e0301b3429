//! Product catalog access
//!
//! The catalog is a remote, paginated API. `CatalogSource` is the seam the
//! request handler depends on; the HTTP client implements it and the TTL
//! cache wraps any other source.

pub mod cache;
pub mod client;

pub use cache::CachedCatalog;
pub use client::HttpCatalog;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CatalogProduct;

/// A source of the full product catalog.
///
/// `fetch_all` either returns the complete catalog or fails with
/// `UpstreamUnavailable`; there is no partial-result fallback.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<CatalogProduct>>;
}
