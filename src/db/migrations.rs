//! Database migrations
//!
//! Versioned schema migrations tracked in a `schema_migrations` table.

use crate::core::error::{KicksError, Result};
use rusqlite::Connection;
use tracing::info;

/// Migration version tracking table
const MIGRATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Initial schema migration (version 1)
const MIGRATION_V1: &str = r#"
-- Admins table (authentication)
-- UNIQUE index on email closes the duplicate-signup race at the storage layer
CREATE TABLE IF NOT EXISTS admins (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    phone_number TEXT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Products table; photos is a JSON array of uploaded filenames, in order
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT,
    description TEXT,
    price REAL NOT NULL DEFAULT 0,
    photos TEXT NOT NULL DEFAULT '[]',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Featured storefront photos, independent of products
CREATE TABLE IF NOT EXISTS popular_shoes (
    id TEXT PRIMARY KEY,
    photo_url TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);

-- Singleton shipping fee record
CREATE TABLE IF NOT EXISTS shipping_fee (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    fee REAL NOT NULL
);

-- Shipping addresses, each owned by exactly one order
CREATE TABLE IF NOT EXISTS addresses (
    id TEXT PRIMARY KEY,
    full_name TEXT,
    contact_number TEXT,
    region TEXT,
    province TEXT,
    municipality TEXT,
    barangay TEXT,
    street_name TEXT,
    building TEXT,
    house_number TEXT,
    zip TEXT
);

-- Orders table
CREATE TABLE IF NOT EXISTS orders (
    id TEXT PRIMARY KEY,
    total REAL,
    status TEXT NOT NULL DEFAULT 'Pending',
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    tracking_number TEXT,
    shipping_fee REAL,
    total_price REAL,
    address_id TEXT,
    FOREIGN KEY (address_id) REFERENCES addresses(id) ON DELETE SET NULL
);

-- Order line items: denormalized product snapshot taken at order time
CREATE TABLE IF NOT EXISTS order_items (
    id TEXT PRIMARY KEY,
    order_id TEXT NOT NULL,
    product_id TEXT,
    name TEXT,
    size TEXT,
    quantity INTEGER NOT NULL DEFAULT 1,
    price REAL NOT NULL DEFAULT 0,
    position INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id, position);
"#;

/// All migrations in order
const MIGRATIONS: &[(i64, &str)] = &[(1, MIGRATION_V1)];

/// Run all pending migrations on the given connection
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(MIGRATION_TABLE)
        .map_err(KicksError::DatabaseError)?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(KicksError::DatabaseError)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current_version {
            continue;
        }

        info!(version, "Applying database migration");
        conn.execute_batch(sql).map_err(KicksError::DatabaseError)?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            [version],
        )
        .map_err(KicksError::DatabaseError)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_apply_cleanly() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('admins', 'products', 'popular_shoes', 'shipping_fee', 'addresses', 'orders', 'order_items')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 7);
    }

    #[test]
    fn test_migrations_record_version() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, 1);

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_admin_email_unique_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO admins (id, name, email, password_hash) VALUES ('1', 'A', 'a@x.com', 'h')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO admins (id, name, email, password_hash) VALUES ('2', 'B', 'a@x.com', 'h')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_shipping_fee_singleton_check() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        conn.execute("INSERT INTO shipping_fee (id, fee) VALUES (1, 50.0)", [])
            .unwrap();

        // Any id other than 1 violates the CHECK constraint
        let result = conn.execute("INSERT INTO shipping_fee (id, fee) VALUES (2, 75.0)", []);
        assert!(result.is_err());
    }
}
