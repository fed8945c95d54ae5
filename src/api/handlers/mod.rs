//! API handlers

pub mod orders;
pub mod popular_shoes;
pub mod products;
pub mod shipping_fee;

pub use orders::*;
pub use popular_shoes::*;
pub use products::*;
pub use shipping_fee::*;

use crate::core::uploads::UploadStore;
use crate::db::repository::{
    AdminRepository, OrderRepository, PopularShoeRepository, ProductRepository,
    ShippingFeeRepository,
};
use std::sync::Arc;

/// Shared application state for handlers
#[derive(Clone)]
pub struct AppState {
    pub admin_repo: Arc<AdminRepository>,
    pub product_repo: Arc<ProductRepository>,
    pub popular_shoe_repo: Arc<PopularShoeRepository>,
    pub shipping_fee_repo: Arc<ShippingFeeRepository>,
    pub order_repo: Arc<OrderRepository>,
    pub uploads: Arc<UploadStore>,
    pub jwt_secret: Arc<String>,
    pub token_ttl_secs: i64,
}
