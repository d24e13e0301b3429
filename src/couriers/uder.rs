//! Uder courier client
//!
//! Payload: flat pickup/dropoff fields plus manifest items carrying name,
//! quantity, price, and per-unit dimensions. The price lives in the `fee`
//! field; a body with an `error` field is a declined quote, distinct from a
//! transport failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::{CourierClient, Dimensions, Origin, DEFAULT_DIMENSIONS_CM};
use crate::config::CourierConfig;
use crate::error::{Error, Result};
use crate::models::{CustomerData, ProcessedLine};

#[derive(Debug, Serialize)]
struct ManifestItem {
    name: String,
    quantity: i64,
    price: f64,
    dimensions: Dimensions,
}

#[derive(Debug, Serialize)]
struct QuoteRequest {
    pickup_address: String,
    pickup_name: String,
    pickup_phone_number: String,
    dropoff_address: String,
    dropoff_name: String,
    dropoff_phone_number: String,
    manifest_items: Vec<ManifestItem>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    fee: Option<f64>,
}

/// Uder tarification client
pub struct Uder {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl Uder {
    /// Create a client from the courier configuration
    pub fn new(config: &CourierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.uder_url.clone(),
            api_key: config.uder_api_key.clone(),
        })
    }

    fn build_payload(
        &self,
        customer: &CustomerData,
        origin: &Origin,
        lines: &[ProcessedLine],
    ) -> QuoteRequest {
        let manifest_items = lines
            .iter()
            .map(|line| ManifestItem {
                name: line.name.clone(),
                quantity: line.quantity_requested,
                price: line.price_per_unit,
                dimensions: DEFAULT_DIMENSIONS_CM,
            })
            .collect();

        QuoteRequest {
            pickup_address: origin.address_street.to_string(),
            pickup_name: origin.name.to_string(),
            pickup_phone_number: origin.phone.to_string(),
            dropoff_address: customer.shipping_street.clone(),
            dropoff_name: customer.name.clone(),
            dropoff_phone_number: customer.phone.clone(),
            manifest_items,
        }
    }
}

#[async_trait]
impl CourierClient for Uder {
    fn name(&self) -> &'static str {
        "Uder"
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

        if let Some(err) = body.error {
            warn!(courier = self.name(), error = %err, "Courier declined to quote");
            return None;
        }

        if body.fee.is_none() {
            warn!(courier = self.name(), "Courier response carried no price");
        }

        body.fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::couriers::STORE_ORIGIN;
    use crate::test_utils::{test_customer, test_processed_line};

    fn client() -> Uder {
        Uder::new(&CourierConfig {
            traelo_ya_url: "http://localhost/tarifier/traelo_ya".to_string(),
            traelo_ya_api_key: "key".to_string(),
            uder_url: "http://localhost/tarifier/uder".to_string(),
            uder_api_key: "key".to_string(),
            request_timeout_secs: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let customer = test_customer();
        let lines = vec![test_processed_line("1", "Essence Mascara", 2)];
        let payload = client().build_payload(&customer, &STORE_ORIGIN, &lines);

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["pickup_name"], "Tienda Flapp");
        assert_eq!(json["pickup_address"], "Juan de Valiente 3630");
        assert_eq!(json["dropoff_name"], customer.name);
        assert_eq!(json["dropoff_address"], customer.shipping_street);
        assert_eq!(json["dropoff_phone_number"], customer.phone);

        assert_eq!(json["manifest_items"][0]["name"], "Essence Mascara");
        assert_eq!(json["manifest_items"][0]["quantity"], 2);
        assert!(json["manifest_items"][0]["dimensions"]["length"].is_number());
    }

    #[test]
    fn test_response_parsing() {
        let body: QuoteResponse = serde_json::from_str(r#"{"fee": 7.25}"#).unwrap();
        assert_eq!(body.fee, Some(7.25));
        assert!(body.error.is_none());

        let body: QuoteResponse =
            serde_json::from_str(r#"{"error": {"code": "NO_COVERAGE"}}"#).unwrap();
        assert!(body.error.is_some());
        assert!(body.fee.is_none());
    }
}
