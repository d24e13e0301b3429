//! TraeloYa courier client
//!
//! Payload: an item list carrying quantity, unit value, and total volume,
//! plus pickup/drop-off waypoints. The price lives at
//! `deliveryOffers.pricing.total`; a body with an `error` field is a declined
//! quote, distinct from a transport failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::{CourierClient, Origin, DEFAULT_UNIT_VOLUME_M3};
use crate::config::CourierConfig;
use crate::error::{Error, Result};
use crate::models::{CustomerData, ProcessedLine};

#[derive(Debug, Serialize)]
struct Item {
    quantity: i64,
    value: f64,
    volume: f64,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "addressStreet")]
    address_street: String,
    city: String,
    phone: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct QuoteRequest {
    items: Vec<Item>,
    waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(rename = "deliveryOffers", default)]
    delivery_offers: Option<DeliveryOffers>,
}

#[derive(Debug, Deserialize)]
struct DeliveryOffers {
    #[serde(default)]
    pricing: Option<Pricing>,
}

#[derive(Debug, Deserialize)]
struct Pricing {
    #[serde(default)]
    total: Option<f64>,
}

/// TraeloYa tarification client
pub struct TraeloYa {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl TraeloYa {
    /// Create a client from the courier configuration
    pub fn new(config: &CourierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.traelo_ya_url.clone(),
            api_key: config.traelo_ya_api_key.clone(),
        })
    }

    fn build_payload(
        &self,
        customer: &CustomerData,
        origin: &Origin,
        lines: &[ProcessedLine],
    ) -> QuoteRequest {
        let items = lines
            .iter()
            .map(|line| Item {
                quantity: line.quantity_requested,
                value: line.price_per_unit,
                volume: DEFAULT_UNIT_VOLUME_M3 * line.quantity_requested as f64,
            })
            .collect();

        QuoteRequest {
            items,
            waypoints: vec![
                Waypoint {
                    kind: "PICK_UP",
                    address_street: origin.address_street.to_string(),
                    city: origin.city.to_string(),
                    phone: origin.phone.to_string(),
                    name: origin.name.to_string(),
                },
                Waypoint {
                    kind: "DROP_OFF",
                    address_street: customer.shipping_street.clone(),
                    city: customer.commune.clone(),
                    phone: customer.phone.clone(),
                    name: customer.name.clone(),
                },
            ],
        }
    }
}

#[async_trait]
impl CourierClient for TraeloYa {
    fn name(&self) -> &'static str {
        "TraeloYa"
    }

    async fn quote(
        &self,
        customer: &CustomerData,
        origin: &Origin,
        lines: &[ProcessedLine],
    ) -> Option<f64> {
        let payload = self.build_payload(customer, origin, lines);

        let response = match self
            .http
            .post(&self.url)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(courier = self.name(), error = %e, "Courier request failed");
                return None;
            },
        };

        if !response.status().is_success() {
            error!(
                courier = self.name(),
                status = %response.status(),
                "Courier returned non-success status"
            );
            return None;
        }

        let body: QuoteResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!(courier = self.name(), error = %e, "Courier returned an invalid body");
                return None;
            },
        };

        // A well-formed response with an error field is a declined quote,
        // not a transport failure
        if let Some(err) = body.error {
            warn!(courier = self.name(), error = %err, "Courier declined to quote");
            return None;
        }

        let total = body
            .delivery_offers
            .and_then(|offers| offers.pricing)
            .and_then(|pricing| pricing.total);

        if total.is_none() {
            warn!(courier = self.name(), "Courier response carried no price");
        }

        total
    }
}
