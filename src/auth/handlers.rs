//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::auth::jwt::issue_token;
use crate::auth::middleware::AuthAdmin;
use crate::auth::models::{
    AdminInfo, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
};
use crate::auth::password::{hash_password, verify_password};
use crate::core::error::{KicksError, Result};
use crate::db::models::Admin;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

/// Handler for POST /api/admin/signup - Admin registration
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "Admin signup attempt");

    if req.email.trim().is_empty() {
        return Err(KicksError::ValidationError("email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(KicksError::ValidationError(
            "password is required".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(KicksError::ValidationError("name is required".to_string()));
    }

    // Pre-check; the UNIQUE index on email catches a concurrent duplicate
    if state.admin_repo.find_by_email(&req.email).await?.is_some() {
        return Err(KicksError::DuplicateEmail(req.email));
    }

    let password_hash = hash_password(&req.password)?;

    let admin = Admin {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        password_hash,
        phone_number: req.phone_number,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.admin_repo.create(&admin).await?;

    tracing::info!(admin_id = %admin.id, email = %admin.email, "Admin created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Admin created successfully".to_string(),
        }),
    ))
}

/// Handler for POST /api/admin/login - Admin login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    tracing::info!(email = %req.email, "Admin login attempt");

    let admin = state
        .admin_repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| KicksError::NotFound("Admin not found".to_string()))?;

    let is_valid = verify_password(&req.password, &admin.password_hash)?;
    if !is_valid {
        tracing::warn!(email = %req.email, "Invalid password");
        return Err(KicksError::AuthenticationError(
            "Invalid credentials".to_string(),
        ));
    }

    let token = issue_token(
        &admin.id,
        &admin.email,
        &state.jwt_secret,
        state.token_ttl_secs,
    )?;

    tracing::info!(admin_id = %admin.id, "Login successful");

    Ok(Json(LoginResponse { token }))
}

/// Handler for GET /api/admin/profile - Current admin profile
pub async fn profile(
    State(state): State<AppState>,
    admin: AuthAdmin,
) -> Result<Json<AdminInfo>> {
    let record = state
        .admin_repo
        .find_by_id(&admin.admin_id)
        .await?
        .ok_or_else(|| KicksError::NotFound("Admin not found".to_string()))?;

    Ok(Json(AdminInfo::from(record)))
}
