//! HTTP client for the remote product catalog
//!
//! Pages through `GET /products?limit=L&skip=S` sequentially. The first
//! page's reported total establishes the stopping condition; an empty page
//! terminates early in case the reported total is inconsistent. Any page
//! failure aborts the whole fetch.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::CatalogSource;
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::models::CatalogProduct;

/// One page of the catalog listing
#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    products: Vec<CatalogProduct>,
    #[serde(default)]
    total: u32,
}

/// Paginated read-through client over the remote product catalog
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl HttpCatalog {
    /// Create a client from the catalog configuration
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    async fn fetch_page(&self, skip: u32) -> Result<CatalogPage> {
        let url = format!(
            "{}/products?limit={}&skip={}",
            self.base_url, self.page_size, skip
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("Catalog request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::upstream(format!(
                "Catalog returned status {} for {}",
                response.status(),
                url
            )));
        }

        response
            .json::<CatalogPage>()
            .await
            .map_err(|e| Error::upstream(format!("Catalog returned an invalid body: {}", e)))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_all(&self) -> Result<Vec<CatalogProduct>> {
        let mut all_products = Vec::new();
        let mut skip = 0u32;
        let mut total: Option<u32> = None;

        loop {
            let page = self.fetch_page(skip).await?;

            // The first page establishes the stopping condition
            if total.is_none() {
                total = Some(page.total);
            }

            let fetched = page.products.len();
            all_products.extend(page.products);
            skip += self.page_size;

            debug!(
                fetched,
                total_so_far = all_products.len(),
                total = total.unwrap_or(0),
                "Fetched catalog page"
            );

            // An empty page means the reported total was inconsistent
            if fetched == 0 {
                break;
            }

            if skip >= total.unwrap_or(0) {
                break;
            }
        }

        info!(products = all_products.len(), "Catalog fetch complete");
        Ok(all_products)
    }
}
