//! Cart quoting endpoint
//!
//! `POST /cart` drives the whole pipeline: validate the request, fetch the
//! catalog, reconcile stock, quote both couriers, and respond with the
//! cheapest valid quote. Every early exit maps to a distinct status through
//! the error taxonomy (400 validation/stock, 404 unknown product, 502
//! catalog outage, 500 no quote).

use axum::{extract::State, Json};
use tracing::{debug, info};

use super::AppState;
use crate::couriers::SelectedQuote;
use crate::error::Result;
use crate::models::CartRequest;
use crate::reconcile::reconcile;

/// Handle a cart purchase simulation request
pub async fn quote_cart(
    State(state): State<AppState>,
    Json(request): Json<CartRequest>,
) -> Result<Json<SelectedQuote>> {
    request.validate_fields()?;
    debug!(lines = request.products.len(), "Cart request validated");

    let catalog = state.catalog.fetch_all().await?;

    // No courier is contacted unless every line clears reconciliation
    let lines = reconcile(&request.products, &catalog)?;

    let selected = state.quotes.best_quote(&request.customer_data, &lines).await?;

    info!(
        lines = lines.len(),
        price = selected.price,
        courier = %selected.courier,
        "Cart quoted"
    );

    Ok(Json(selected))
}
