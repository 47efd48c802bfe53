//! Authentication and authorization

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_user::{User, ADMIN_ROLE};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub roles: Vec<String>,
    pub is_superuser: bool,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing or malformed Authorization header")]
    MissingCredentials,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issues an HS256 token for `user`
pub fn create_token(user: &User, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let iat = Utc::now().timestamp();
    let lifetime = i64::try_from(expiration_secs).unwrap_or(i64::MAX);

    let claims = Claims {
        sub: user.id.as_uuid().to_string(),
        username: user.username.clone(),
        roles: user.roles.clone(),
        is_superuser: user.is_superuser,
        exp: iat.saturating_add(lifetime),
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Validates signature and expiry
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Superusers and admins hold every role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims.is_superuser || claims.roles.iter().any(|r| r == required_role || r == ADMIN_ROLE)
}
