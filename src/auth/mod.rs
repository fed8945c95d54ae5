//! Authentication module
//!
//! This module provides authentication functionality including:
//! - Admin signup and login
//! - JWT token issuance and verification
//! - Password hashing and verification
//! - Authentication middleware

pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use handlers::{login, profile, signup};
pub use jwt::{issue_token, verify_token, Claims};
pub use middleware::{authenticate, AuthAdmin};
pub use password::{hash_password, verify_password};
