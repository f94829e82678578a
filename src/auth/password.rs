//! Password hashing

use tracing::error;

use crate::common::ApiError;

/// Hashes on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, ApiError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::InternalServer(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServer("failed to hash password".to_string())
        })
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::InternalServer(format!("verification task failed: {}", e)))?;

    Ok(verified.unwrap_or(false))
}
