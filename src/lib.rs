//! Kicks Admin Backend Library
//!
//! This library provides the core functionality for the Kicks admin backend:
//! admin authentication, the product catalog, featured-shoe photos, shipping
//! fee management, and order listing over a REST API.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;

// Re-export commonly used types
pub use crate::core::{Config, KicksError, Logger, UploadStore};
pub use api::ApiServer;
pub use db::DatabaseManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for the library
pub type Result<T> = anyhow::Result<T>;
