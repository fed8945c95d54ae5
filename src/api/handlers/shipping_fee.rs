//! Singleton shipping fee handlers

use crate::api::handlers::AppState;
use crate::core::error::{KicksError, Result};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Shipping fee payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ShippingFeeBody {
    pub fee: f64,
}

/// Response after updating the fee
#[derive(Debug, Serialize, Deserialize)]
pub struct ShippingFeeUpdated {
    pub message: String,
    pub fee: f64,
}

/// Handler for GET /api/shipping-fee - Current fee
pub async fn get_shipping_fee(State(state): State<AppState>) -> Result<Json<ShippingFeeBody>> {
    let fee = state
        .shipping_fee_repo
        .get()
        .await?
        .ok_or_else(|| KicksError::NotFound("Shipping fee not set".to_string()))?;
    Ok(Json(ShippingFeeBody { fee }))
}

/// Handler for PUT /api/shipping-fee - Create or overwrite the singleton fee
pub async fn update_shipping_fee(
    State(state): State<AppState>,
    Json(body): Json<ShippingFeeBody>,
) -> Result<Json<ShippingFeeUpdated>> {
    let fee = state.shipping_fee_repo.set(body.fee).await?;

    tracing::info!(fee, "Shipping fee updated");

    Ok(Json(ShippingFeeUpdated {
        message: "Shipping fee updated successfully".to_string(),
        fee,
    }))
}
