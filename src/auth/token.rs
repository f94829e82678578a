//! JWT issuing and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};

use super::models::Claims;
use crate::common::ApiError;
use crate::users::User;

/// Signs a token for `user`; returns the token and its expiry in epoch seconds.
pub fn issue_token(user: &User, secret: &str, ttl: Duration) -> Result<(String, i64), ApiError> {
    let now = Utc::now();
    let exp = (now + ttl).timestamp();

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        exp: exp as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, user_id = user.id, "JWT encoding error");
        ApiError::InternalServer("jwt error".to_string())
    })?;

    Ok((token, exp))
}

/// Validates signature and expiry and returns the user id claim.
pub fn decode_user_id(token: &str, secret: &str) -> Result<i64, ApiError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        warn!(error = %e, "JWT token validation failed");
        ApiError::Unauthorized("invalid token".into())
    })?;

    decoded
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| ApiError::Unauthorized("invalid token claims".into()))
}
