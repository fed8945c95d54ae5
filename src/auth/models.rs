//! Authentication request/response models

use serde::{Deserialize, Serialize};

/// Signup request
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Admin info (without password hash)
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: String,
}

impl From<crate::db::models::Admin> for AdminInfo {
    fn from(admin: crate::db::models::Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            phone_number: admin.phone_number,
            created_at: admin.created_at,
        }
    }
}

/// Generic message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
