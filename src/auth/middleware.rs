//! Authentication middleware

use crate::auth::jwt::verify_token;
use crate::core::error::{KicksError, Result};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Authenticated admin identity attached to the request after verification
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub admin_id: String,
    pub email: String,
}

/// Authentication middleware for the protected route group
///
/// Extracts a bearer token from the Authorization header, verifies it, and
/// attaches the decoded identity to the request extensions. A missing or
/// malformed header is 401; a token that fails verification is 403. The
/// credential store is not consulted here, only at login and signup.
pub async fn authenticate(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match token {
        Some(t) => t,
        None => {
            let error =
                KicksError::AuthenticationError("Missing bearer token".to_string());
            return error.into_response();
        }
    };

    let claims = match verify_token(token, &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(AuthAdmin {
        admin_id: claims.admin_id,
        email: claims.email,
    });

    next.run(request).await
}

// Enable extraction of the authenticated admin directly in handlers
#[async_trait]
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = KicksError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthAdmin>()
            .cloned()
            .ok_or_else(|| KicksError::AuthenticationError("Admin not authenticated".to_string()))
    }
}
