//! Order listing handlers
//!
//! Orders are created by the storefront checkout flow; the admin backend only
//! lists them, with line items and the shipping address expanded.

use crate::api::handlers::AppState;
use crate::core::error::Result;
use crate::db::models::OrderWithDetails;
use axum::{extract::State, Json};

/// Handler for GET /orders - List all orders with resolved addresses
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderWithDetails>>> {
    let orders = state.order_repo.find_all_with_details().await?;
    Ok(Json(orders))
}
