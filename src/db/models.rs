//! Database models
//!
//! Data structures representing database tables

use serde::{Deserialize, Serialize};

/// Admin record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub created_at: String,
}

/// Product record in the database
///
/// `photos` holds uploaded filenames in display order; the files themselves
/// live in the upload directory and are served at `/uploads/<filename>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub photos: Vec<String>,
    pub created_at: String,
}

/// Featured storefront photo, independent of any product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularShoe {
    pub id: String,
    pub photo_url: String,
    pub created_at: String,
}

/// Shipping address record, owned by exactly one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
    pub region: Option<String>,
    pub province: Option<String>,
    pub municipality: Option<String>,
    pub barangay: Option<String>,
    pub street_name: Option<String>,
    pub building: Option<String>,
    pub house_number: Option<String>,
    pub zip: Option<String>,
}

/// Order record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub total: Option<f64>,
    pub status: String,
    pub created_at: String,
    pub tracking_number: Option<String>,
    pub shipping_fee: Option<f64>,
    pub total_price: Option<f64>,
    pub address_id: Option<String>,
}

/// Order line item: product snapshot taken at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub position: i64,
}

/// Order with its line items and resolved shipping address
///
/// The address is joined on `orders.address_id`; orders whose address record
/// is gone list `address: null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub address: Option<Address>,
}
