//! Integration tests for the outbound HTTP clients
//!
//! These tests run the real reqwest-based catalog and courier clients
//! against stub upstream servers bound to ephemeral ports.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use cartquote::catalog::{CatalogSource, HttpCatalog};
use cartquote::config::{CatalogConfig, CourierConfig};
use cartquote::couriers::{CourierClient, TraeloYa, Uder, STORE_ORIGIN};
use cartquote::error::Error;
use cartquote::test_utils::{test_customer, test_processed_line};

/// Serve a stub router on an ephemeral port, returning its base URL
async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn catalog_config(base_url: String) -> CatalogConfig {
    CatalogConfig {
        base_url,
        page_size: 10,
        request_timeout_secs: 5,
        cache_ttl_secs: 0,
    }
}

fn courier_config(traelo_ya_url: String, uder_url: String) -> CourierConfig {
    CourierConfig {
        traelo_ya_url,
        traelo_ya_api_key: "traelo-key".to_string(),
        uder_url,
        uder_api_key: "uder-key".to_string(),
        request_timeout_secs: 5,
    }
}

/// Stub catalog serving `count` products, paged per the limit/skip params
fn paged_catalog(count: usize) -> Router {
    Router::new().route(
        "/products",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            let limit: usize = params
                .get("limit")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10);
            let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);

            let page: Vec<Value> = (1..=count)
                .skip(skip)
                .take(limit)
                .map(|i| {
                    json!({
                        "id": i,
                        "title": format!("Product {}", i),
                        "stock": 10,
                        "rating": 2.0
                    })
                })
                .collect();

            Json(json!({"products": page, "total": count}))
        }),
    )
}

#[tokio::test]
async fn test_catalog_fetches_every_page() {
    let base_url = spawn_stub(paged_catalog(25)).await;
    let client = HttpCatalog::new(&catalog_config(base_url)).unwrap();

    let products = client.fetch_all().await.unwrap();

    assert_eq!(products.len(), 25);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[24].id, 25);
}

#[tokio::test]
async fn test_catalog_single_short_page() {
    let base_url = spawn_stub(paged_catalog(3)).await;
    let client = HttpCatalog::new(&catalog_config(base_url)).unwrap();

    let products = client.fetch_all().await.unwrap();
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_catalog_empty_page_stops_pagination() {
    // The stub lies: total says 100 but only the first page has products.
    // The fetch must terminate instead of looping on empty pages.
    let app = Router::new().route(
        "/products",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
            let page: Vec<Value> = if skip == 0 {
                (1..=10)
                    .map(|i| json!({"id": i, "title": format!("P{}", i), "stock": 1, "rating": 1.0}))
                    .collect()
            } else {
                vec![]
            };
            Json(json!({"products": page, "total": 100}))
        }),
    );

    let base_url = spawn_stub(app).await;
    let client = HttpCatalog::new(&catalog_config(base_url)).unwrap();

    let products = client.fetch_all().await.unwrap();
    assert_eq!(products.len(), 10);
}

#[tokio::test]
async fn test_catalog_error_page_aborts_fetch() {
    let app = Router::new().route(
        "/products",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );

    let base_url = spawn_stub(app).await;
    let client = HttpCatalog::new(&catalog_config(base_url)).unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn test_catalog_unreachable_host_aborts_fetch() {
    // Nothing listens on this port
    let client = HttpCatalog::new(&catalog_config("http://127.0.0.1:1".to_string())).unwrap();

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn test_traelo_ya_success_with_api_key() {
    let app = Router::new().route(
        "/tarifier/traelo_ya",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("traelo-key") {
                return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})))
                    .into_response();
            }
            if !body["items"].is_array() || !body["waypoints"].is_array() {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad payload"})))
                    .into_response();
            }
            Json(json!({"deliveryOffers": {"pricing": {"total": 5.5}}})).into_response()
        }),
    );

    let base_url = spawn_stub(app).await;
    let client = TraeloYa::new(&courier_config(
        format!("{}/tarifier/traelo_ya", base_url),
        "http://127.0.0.1:1".to_string(),
    ))
    .unwrap();

    let lines = vec![test_processed_line("1", "Essence Mascara", 2)];
    let total = client.quote(&test_customer(), &STORE_ORIGIN, &lines).await;

    assert_eq!(total, Some(5.5));
}

#[tokio::test]
async fn test_traelo_ya_error_body_is_no_quote() {
    let app = Router::new().route(
        "/tarifier/traelo_ya",
        post(|| async { Json(json!({"error": "no coverage for commune"})) }),
    );

    let base_url = spawn_stub(app).await;
    let client = TraeloYa::new(&courier_config(
        format!("{}/tarifier/traelo_ya", base_url),
        "http://127.0.0.1:1".to_string(),
    ))
    .unwrap();

    let total = client.quote(&test_customer(), &STORE_ORIGIN, &[]).await;
    assert!(total.is_none());
}

#[tokio::test]
async fn test_traelo_ya_transport_failure_is_no_quote() {
    let app = Router::new().route(
        "/tarifier/traelo_ya",
        post(|| async { StatusCode::BAD_GATEWAY }),
    );

    let base_url = spawn_stub(app).await;
    let client = TraeloYa::new(&courier_config(
        format!("{}/tarifier/traelo_ya", base_url),
        "http://127.0.0.1:1".to_string(),
    ))
    .unwrap();

    let total = client.quote(&test_customer(), &STORE_ORIGIN, &[]).await;
    assert!(total.is_none());
}

#[tokio::test]
async fn test_uder_success_with_manifest_items() {
    let app = Router::new().route(
        "/tarifier/uder",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("uder-key") {
                return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})))
                    .into_response();
            }
            if !body["manifest_items"].is_array() || !body["dropoff_address"].is_string() {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad payload"})))
                    .into_response();
            }
            Json(json!({"fee": 7.25})).into_response()
        }),
    );

    let base_url = spawn_stub(app).await;
    let client = Uder::new(&courier_config(
        "http://127.0.0.1:1".to_string(),
        format!("{}/tarifier/uder", base_url),
    ))
    .unwrap();

    let lines = vec![test_processed_line("1", "Essence Mascara", 2)];
    let total = client.quote(&test_customer(), &STORE_ORIGIN, &lines).await;

    assert_eq!(total, Some(7.25));
}

#[tokio::test]
async fn test_uder_transport_failure_is_no_quote() {
    let client = Uder::new(&courier_config(
        "http://127.0.0.1:1".to_string(),
        "http://127.0.0.1:1/tarifier/uder".to_string(),
    ))
    .unwrap();

    let total = client.quote(&test_customer(), &STORE_ORIGIN, &[]).await;
    assert!(total.is_none());
}
