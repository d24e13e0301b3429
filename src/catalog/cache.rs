//! Time-bounded catalog cache
//!
//! The catalog is global (the cache is keyed by nothing), so a single
//! snapshot with a TTL is enough to stop every cart request from refetching
//! the entire catalog. Fetch failures are never cached.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::CatalogSource;
use crate::error::Result;
use crate::models::CatalogProduct;

struct Snapshot {
    fetched_at: Instant,
    products: Arc<Vec<CatalogProduct>>,
}

/// TTL wrapper over any `CatalogSource`
pub struct CachedCatalog {
    inner: Arc<dyn CatalogSource>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CachedCatalog {
    /// Wrap a catalog source with a time-bounded snapshot cache
    pub fn new(inner: Arc<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
        }
    }
}

#[async_trait]
impl CatalogSource for CachedCatalog {
    async fn fetch_all(&self) -> Result<Vec<CatalogProduct>> {
        if self.ttl.is_zero() {
            return self.inner.fetch_all().await;
        }

        {
            let snapshot = self.snapshot.read().await;
            if let Some(snap) = snapshot.as_ref() {
                if snap.fetched_at.elapsed() < self.ttl {
                    debug!(
                        products = snap.products.len(),
                        age_ms = snap.fetched_at.elapsed().as_millis() as u64,
                        "Serving catalog from cache"
                    );
                    return Ok(snap.products.as_ref().clone());
                }
            }
        }

        let mut snapshot = self.snapshot.write().await;

        // Another request may have refreshed while we waited for the lock
        if let Some(snap) = snapshot.as_ref() {
            if snap.fetched_at.elapsed() < self.ttl {
                return Ok(snap.products.as_ref().clone());
            }
        }

        let products = Arc::new(self.inner.fetch_all().await?);
        *snapshot = Some(Snapshot {
            fetched_at: Instant::now(),
            products: products.clone(),
        });

        Ok(products.as_ref().clone())
    }
}
