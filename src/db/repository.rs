//! Repository pattern implementation for data access layer
//!
//! This module provides the Repository pattern for abstracting database operations.

use crate::core::error::{KicksError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::models::{Address, Admin, Order, OrderItem, OrderWithDetails, PopularShoe, Product};
use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row};
use std::sync::Arc;

/// Generic repository trait for CRUD operations
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find an entity by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<()>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<()>;

    /// Delete an entity by its ID
    async fn delete(&self, id: &str) -> Result<()>;
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn map_admin_row(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        phone_number: row.get(4)?,
        created_at: row.get(5)?,
    })
}

const ADMIN_COLUMNS: &str = "id, name, email, password_hash, phone_number, created_at";

/// Repository for Admin entities (the credential store)
pub struct AdminRepository {
    db: Arc<DatabaseManager>,
}

impl AdminRepository {
    /// Create a new AdminRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find an admin by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let email = email.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM admins WHERE email = ?", ADMIN_COLUMNS),
                    [&email],
                    map_admin_row,
                )
                .optional()
                .map_err(KicksError::DatabaseError)
            })
            .await
    }

    /// Find an admin by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Admin>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    &format!("SELECT {} FROM admins WHERE id = ?", ADMIN_COLUMNS),
                    [&id],
                    map_admin_row,
                )
                .optional()
                .map_err(KicksError::DatabaseError)
            })
            .await
    }

    /// Create a new admin record
    ///
    /// The UNIQUE index on email backs the handler-level pre-check: a
    /// concurrent duplicate insert still surfaces as `DuplicateEmail`.
    pub async fn create(&self, admin: &Admin) -> Result<()> {
        let admin = admin.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO admins (id, name, email, password_hash, phone_number, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?)",
                    rusqlite::params![
                        &admin.id,
                        &admin.name,
                        &admin.email,
                        &admin.password_hash,
                        &admin.phone_number,
                        &admin.created_at,
                    ],
                )
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        KicksError::DuplicateEmail(admin.email.clone())
                    } else {
                        KicksError::DatabaseError(e)
                    }
                })?;
                Ok(())
            })
            .await
    }

    /// Count admin records
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
                    .map_err(KicksError::DatabaseError)
            })
            .await
    }
}

/// Scalar field updates for a product; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

fn decode_photos(raw: String) -> Result<Vec<String>> {
    serde_json::from_str(&raw)
        .map_err(|e| KicksError::SerializationError(format!("Invalid photos column: {}", e)))
}

fn encode_photos(photos: &[String]) -> Result<String> {
    serde_json::to_string(photos)
        .map_err(|e| KicksError::SerializationError(format!("Failed to encode photos: {}", e)))
}

fn map_product_row(row: &Row<'_>) -> rusqlite::Result<(Product, String)> {
    let raw_photos: String = row.get(5)?;
    Ok((
        Product {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
            price: row.get(4)?,
            photos: Vec::new(),
            created_at: row.get(6)?,
        },
        raw_photos,
    ))
}

const PRODUCT_COLUMNS: &str = "id, name, category, description, price, photos, created_at";

fn query_product(conn: &rusqlite::Connection, id: &str) -> Result<Option<Product>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS),
            [id],
            map_product_row,
        )
        .optional()
        .map_err(KicksError::DatabaseError)?;

    match row {
        Some((mut product, raw_photos)) => {
            product.photos = decode_photos(raw_photos)?;
            Ok(Some(product))
        }
        None => Ok(None),
    }
}

/// Repository for Product entities (the catalog store)
pub struct ProductRepository {
    db: Arc<DatabaseManager>,
}

impl ProductRepository {
    /// Create a new ProductRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Apply scalar field updates and append new photo filenames
    ///
    /// Photo merging is append-only: existing entries keep their order and
    /// `new_photos` lands at the end. Fails with `NotFound` for unknown ids.
    pub async fn update_with_photos(
        &self,
        id: &str,
        fields: ProductUpdate,
        new_photos: Vec<String>,
    ) -> Result<Product> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let mut product = query_product(conn, &id)?
                    .ok_or_else(|| KicksError::NotFound(format!("Product {} not found", id)))?;

                if let Some(name) = fields.name {
                    product.name = name;
                }
                if let Some(category) = fields.category {
                    product.category = Some(category);
                }
                if let Some(description) = fields.description {
                    product.description = Some(description);
                }
                if let Some(price) = fields.price {
                    product.price = price;
                }
                product.photos.extend(new_photos);

                let photos = encode_photos(&product.photos)?;
                conn.execute(
                    "UPDATE products SET name = ?, category = ?, description = ?, price = ?, photos = ? \
                     WHERE id = ?",
                    rusqlite::params![
                        &product.name,
                        &product.category,
                        &product.description,
                        product.price,
                        &photos,
                        &product.id,
                    ],
                )
                .map_err(KicksError::DatabaseError)?;

                Ok(product)
            })
            .await
    }

    /// Remove a single photo filename from a product's photo list
    ///
    /// Remaining entries keep their original order. A filename that is not in
    /// the list leaves the product unchanged and still succeeds.
    pub async fn remove_photo(&self, id: &str, filename: &str) -> Result<Product> {
        let id = id.to_string();
        let filename = filename.to_string();
        self.db
            .execute(move |conn| {
                let mut product = query_product(conn, &id)?
                    .ok_or_else(|| KicksError::NotFound(format!("Product {} not found", id)))?;

                let before = product.photos.len();
                product.photos.retain(|photo| photo != &filename);

                if product.photos.len() != before {
                    let photos = encode_photos(&product.photos)?;
                    conn.execute(
                        "UPDATE products SET photos = ? WHERE id = ?",
                        rusqlite::params![&photos, &product.id],
                    )
                    .map_err(KicksError::DatabaseError)?;
                }

                Ok(product)
            })
            .await
    }
}

#[async_trait]
impl Repository<Product> for ProductRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let id = id.to_string();
        self.db.execute(move |conn| query_product(conn, &id)).await
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT {} FROM products ORDER BY created_at DESC",
                        PRODUCT_COLUMNS
                    ))
                    .map_err(KicksError::DatabaseError)?;

                let rows = stmt
                    .query_map([], map_product_row)
                    .map_err(KicksError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(KicksError::DatabaseError)?;

                let mut products = Vec::with_capacity(rows.len());
                for (mut product, raw_photos) in rows {
                    product.photos = decode_photos(raw_photos)?;
                    products.push(product);
                }
                Ok(products)
            })
            .await
    }

    async fn create(&self, product: &Product) -> Result<()> {
        let product = product.clone();
        self.db
            .execute(move |conn| {
                let photos = encode_photos(&product.photos)?;
                conn.execute(
                    "INSERT INTO products (id, name, category, description, price, photos, created_at) \
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                    rusqlite::params![
                        &product.id,
                        &product.name,
                        &product.category,
                        &product.description,
                        product.price,
                        &photos,
                        &product.created_at,
                    ],
                )
                .map_err(KicksError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let product = product.clone();
        self.db
            .execute(move |conn| {
                let photos = encode_photos(&product.photos)?;
                let changed = conn
                    .execute(
                        "UPDATE products SET name = ?, category = ?, description = ?, price = ?, photos = ? \
                         WHERE id = ?",
                        rusqlite::params![
                            &product.name,
                            &product.category,
                            &product.description,
                            product.price,
                            &photos,
                            &product.id,
                        ],
                    )
                    .map_err(KicksError::DatabaseError)?;

                if changed == 0 {
                    return Err(KicksError::NotFound(format!(
                        "Product {} not found",
                        product.id
                    )));
                }
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let changed = conn
                    .execute("DELETE FROM products WHERE id = ?", [&id])
                    .map_err(KicksError::DatabaseError)?;

                if changed == 0 {
                    return Err(KicksError::NotFound(format!("Product {} not found", id)));
                }
                Ok(())
            })
            .await
    }
}

fn map_popular_shoe_row(row: &Row<'_>) -> rusqlite::Result<PopularShoe> {
    Ok(PopularShoe {
        id: row.get(0)?,
        photo_url: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Repository for PopularShoe entities
pub struct PopularShoeRepository {
    db: Arc<DatabaseManager>,
}

impl PopularShoeRepository {
    /// Create a new PopularShoeRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find all featured shoes
    pub async fn find_all(&self) -> Result<Vec<PopularShoe>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, photo_url, created_at FROM popular_shoes \
                         ORDER BY created_at DESC",
                    )
                    .map_err(KicksError::DatabaseError)?;

                let shoes = stmt
                    .query_map([], map_popular_shoe_row)
                    .map_err(KicksError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(KicksError::DatabaseError)?;

                Ok(shoes)
            })
            .await
    }

    /// Find a featured shoe by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<PopularShoe>> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, photo_url, created_at FROM popular_shoes WHERE id = ?",
                    [&id],
                    map_popular_shoe_row,
                )
                .optional()
                .map_err(KicksError::DatabaseError)
            })
            .await
    }

    /// Create a new featured shoe
    pub async fn create(&self, shoe: &PopularShoe) -> Result<()> {
        let shoe = shoe.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO popular_shoes (id, photo_url, created_at) VALUES (?, ?, ?)",
                    rusqlite::params![&shoe.id, &shoe.photo_url, &shoe.created_at],
                )
                .map_err(KicksError::DatabaseError)?;
                Ok(())
            })
            .await
    }

    /// Delete a featured shoe by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let changed = conn
                    .execute("DELETE FROM popular_shoes WHERE id = ?", [&id])
                    .map_err(KicksError::DatabaseError)?;

                if changed == 0 {
                    return Err(KicksError::NotFound(format!(
                        "Popular shoe {} not found",
                        id
                    )));
                }
                Ok(())
            })
            .await
    }
}

/// Repository for the singleton shipping fee record
pub struct ShippingFeeRepository {
    db: Arc<DatabaseManager>,
}

impl ShippingFeeRepository {
    /// Create a new ShippingFeeRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Get the current shipping fee, if one has been set
    pub async fn get(&self) -> Result<Option<f64>> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT fee FROM shipping_fee WHERE id = 1", [], |row| {
                    row.get(0)
                })
                .optional()
                .map_err(KicksError::DatabaseError)
            })
            .await
    }

    /// Set the shipping fee (insert or overwrite the singleton row)
    pub async fn set(&self, fee: f64) -> Result<f64> {
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO shipping_fee (id, fee) VALUES (1, ?) \
                     ON CONFLICT(id) DO UPDATE SET fee = excluded.fee",
                    [fee],
                )
                .map_err(KicksError::DatabaseError)?;
                Ok(fee)
            })
            .await
    }
}

fn map_order_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        total: row.get(1)?,
        status: row.get(2)?,
        created_at: row.get(3)?,
        tracking_number: row.get(4)?,
        shipping_fee: row.get(5)?,
        total_price: row.get(6)?,
        address_id: row.get(7)?,
    })
}

fn map_address_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: row.get(0)?,
        full_name: row.get(1)?,
        contact_number: row.get(2)?,
        region: row.get(3)?,
        province: row.get(4)?,
        municipality: row.get(5)?,
        barangay: row.get(6)?,
        street_name: row.get(7)?,
        building: row.get(8)?,
        house_number: row.get(9)?,
        zip: row.get(10)?,
    })
}

fn map_order_item_row(row: &Row<'_>) -> rusqlite::Result<OrderItem> {
    Ok(OrderItem {
        id: row.get(0)?,
        order_id: row.get(1)?,
        product_id: row.get(2)?,
        name: row.get(3)?,
        size: row.get(4)?,
        quantity: row.get(5)?,
        price: row.get(6)?,
        position: row.get(7)?,
    })
}

/// Repository for Order entities
///
/// Orders are created by the storefront checkout flow outside this backend;
/// here they are only listed with their line items and shipping address.
pub struct OrderRepository {
    db: Arc<DatabaseManager>,
}

impl OrderRepository {
    /// Create a new OrderRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Find all orders with line items and the resolved shipping address
    ///
    /// The address join targets `orders.address_id`; an order whose address
    /// record is missing still lists with `address: None`.
    pub async fn find_all_with_details(&self) -> Result<Vec<OrderWithDetails>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, total, status, created_at, tracking_number, shipping_fee, \
                         total_price, address_id FROM orders ORDER BY created_at DESC",
                    )
                    .map_err(KicksError::DatabaseError)?;

                let orders = stmt
                    .query_map([], map_order_row)
                    .map_err(KicksError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(KicksError::DatabaseError)?;

                let mut item_stmt = conn
                    .prepare(
                        "SELECT id, order_id, product_id, name, size, quantity, price, position \
                         FROM order_items WHERE order_id = ? ORDER BY position",
                    )
                    .map_err(KicksError::DatabaseError)?;

                let mut address_stmt = conn
                    .prepare(
                        "SELECT id, full_name, contact_number, region, province, municipality, \
                         barangay, street_name, building, house_number, zip \
                         FROM addresses WHERE id = ?",
                    )
                    .map_err(KicksError::DatabaseError)?;

                let mut detailed = Vec::with_capacity(orders.len());
                for order in orders {
                    let items = item_stmt
                        .query_map([&order.id], map_order_item_row)
                        .map_err(KicksError::DatabaseError)?
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(KicksError::DatabaseError)?;

                    let address = match &order.address_id {
                        Some(address_id) => address_stmt
                            .query_row([address_id], map_address_row)
                            .optional()
                            .map_err(KicksError::DatabaseError)?,
                        None => None,
                    };

                    detailed.push(OrderWithDetails {
                        order,
                        items,
                        address,
                    });
                }

                Ok(detailed)
            })
            .await
    }
}
