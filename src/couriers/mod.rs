//! Courier quoting
//!
//! Two shipping providers are asked to price the same normalized order; the
//! aggregator fires both calls concurrently, tolerates either one failing,
//! and keeps the cheapest valid quote. The pattern generalizes to N
//! providers: priority is the construction order of the client list.

pub mod traelo_ya;
pub mod uder;

pub use traelo_ya::TraeloYa;
pub use uder::Uder;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{CustomerData, ProcessedLine};

/// Fixed pickup origin for all shipments
#[derive(Debug, Clone, Copy)]
pub struct Origin {
    pub name: &'static str,
    pub phone: &'static str,
    pub address_street: &'static str,
    pub city: &'static str,
}

/// The store all orders ship from
pub const STORE_ORIGIN: Origin = Origin {
    name: "Tienda Flapp",
    phone: "+569 1234 5678",
    address_street: "Juan de Valiente 3630",
    city: "Vitacura",
};

/// Per-unit parcel dimensions in centimeters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

// The catalog carries no physical dimensions, so couriers are quoted with
// fixed per-unit defaults.
pub const DEFAULT_DIMENSIONS_CM: Dimensions = Dimensions {
    length: 10.0,
    width: 10.0,
    height: 10.0,
};

/// Default per-unit volume in cubic meters (a 10 cm cube)
pub const DEFAULT_UNIT_VOLUME_M3: f64 = 0.001;

/// One courier's pricing result
#[derive(Debug, Clone)]
pub struct CourierQuote {
    /// Courier display name
    pub courier: &'static str,
    /// Total shipping price, or None when the courier failed to quote
    pub total: Option<f64>,
}

/// The selected cheapest quote, returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct SelectedQuote {
    pub price: f64,
    pub courier: String,
}

/// A shipping-price provider.
///
/// Implementations are failure-isolated: any transport failure or declined
/// quote is logged internally and surfaces as `None`, never as an error, so
/// one courier's outage cannot block the other.
#[async_trait]
pub trait CourierClient: Send + Sync {
    /// Courier display name, used in the response and in logs
    fn name(&self) -> &'static str;

    /// Request a shipping price for the order
    async fn quote(
        &self,
        customer: &CustomerData,
        origin: &Origin,
        lines: &[ProcessedLine],
    ) -> Option<f64>;
}

/// Builds courier requests from a normalized order and selects the minimum
/// valid quote.
pub struct QuoteAggregator {
    couriers: Vec<Arc<dyn CourierClient>>,
}

impl QuoteAggregator {
    /// Create an aggregator. The list order is the selection priority order.
    pub fn new(couriers: Vec<Arc<dyn CourierClient>>) -> Self {
        Self { couriers }
    }

    /// Quote every courier concurrently and keep the cheapest valid price.
    ///
    /// Selection walks the results in priority order with a strict
    /// less-than comparison, so a tie keeps the earlier courier.
    pub async fn best_quote(
        &self,
        customer: &CustomerData,
        lines: &[ProcessedLine],
    ) -> Result<SelectedQuote> {
        let quotes: Vec<CourierQuote> = join_all(self.couriers.iter().map(|courier| async {
            CourierQuote {
                courier: courier.name(),
                total: courier.quote(customer, &STORE_ORIGIN, lines).await,
            }
        }))
        .await;

        for quote in &quotes {
            debug!(courier = quote.courier, total = ?quote.total, "Courier quote");
        }

        let mut best: Option<SelectedQuote> = None;
        for quote in &quotes {
            if let Some(total) = quote.total {
                let cheaper = match &best {
                    Some(current) => total < current.price,
                    None => true,
                };
                if cheaper {
                    best = Some(SelectedQuote {
                        price: total,
                        courier: quote.courier.to_string(),
                    });
                }
            }
        }

        match best {
            Some(selected) => {
                info!(
                    price = selected.price,
                    courier = %selected.courier,
                    "Selected cheapest courier quote"
                );
                Ok(selected)
            },
            None => Err(Error::NoQuoteAvailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_customer, MockCourier};

    fn aggregator(couriers: Vec<MockCourier>) -> QuoteAggregator {
        QuoteAggregator::new(
            couriers
                .into_iter()
                .map(|c| Arc::new(c) as Arc<dyn CourierClient>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_minimum_quote_selected() {
        let agg = aggregator(vec![
            MockCourier::quoting("TraeloYa", 5.50),
            MockCourier::quoting("Uder", 7.25),
        ]);

        let selected = agg.best_quote(&test_customer(), &[]).await.unwrap();
        assert!((selected.price - 5.50).abs() < f64::EPSILON);
        assert_eq!(selected.courier, "TraeloYa");
    }

    #[tokio::test]
    async fn test_second_courier_wins_when_cheaper() {
        let agg = aggregator(vec![
            MockCourier::quoting("TraeloYa", 9.00),
            MockCourier::quoting("Uder", 4.10),
        ]);

        let selected = agg.best_quote(&test_customer(), &[]).await.unwrap();
        assert_eq!(selected.courier, "Uder");
    }

    #[tokio::test]
    async fn test_tie_keeps_first_courier() {
        let agg = aggregator(vec![
            MockCourier::quoting("TraeloYa", 6.00),
            MockCourier::quoting("Uder", 6.00),
        ]);

        let selected = agg.best_quote(&test_customer(), &[]).await.unwrap();
        assert_eq!(selected.courier, "TraeloYa");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_the_other() {
        let agg = aggregator(vec![
            MockCourier::failing("TraeloYa"),
            MockCourier::quoting("Uder", 7.25),
        ]);

        let selected = agg.best_quote(&test_customer(), &[]).await.unwrap();
        assert_eq!(selected.courier, "Uder");
        assert!((selected.price - 7.25).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_all_failures_yield_no_quote_available() {
        let agg = aggregator(vec![
            MockCourier::failing("TraeloYa"),
            MockCourier::failing("Uder"),
        ]);

        let err = agg.best_quote(&test_customer(), &[]).await.unwrap_err();
        assert!(matches!(err, Error::NoQuoteAvailable));
    }
}
