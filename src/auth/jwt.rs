//! JWT token issuance and verification

use crate::core::error::{KicksError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// One claim shape for every issuance site: both the login flow and the
/// middleware need the admin id recoverable from the token, and the profile
/// handler additionally reads the email.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub admin_id: String,
    pub email: String,
    pub exp: usize,
}

/// Issue a signed token for an admin, valid for `ttl_secs` from now
pub fn issue_token(admin_id: &str, email: &str, secret: &str, ttl_secs: i64) -> Result<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(ttl_secs))
        .ok_or_else(|| {
            KicksError::AuthenticationError("Failed to calculate expiration".to_string())
        })?
        .timestamp() as usize;

    let claims = Claims {
        admin_id: admin_id.to_string(),
        email: email.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| KicksError::AuthenticationError(format!("Failed to issue token: {}", e)))
}

/// Verify a token and extract its claims
///
/// Distinguishes an expired token from one that fails cryptographic
/// validation; both map to 403 when raised by the auth middleware.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => KicksError::TokenExpired,
        _ => KicksError::InvalidToken(e.to_string()),
    })?;

    Ok(token_data.claims)
}
