//! Authentication handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{LoginRequest, LoginResponse};
use super::password::verify_password;
use super::token::issue_token;
use crate::common::{
    safe_email_log, safe_token_log, success, ApiError, ApiJson, AppState, Envelope,
};
use crate::users::UsersService;

/// POST /api/v1/login
/// Exchanges email + password for a JWT
///
/// # Request Body
/// ```json
/// { "email": "john.doe@example.com", "password": "securepassword" }
/// ```
///
/// # Response
/// ```json
/// { "status": "success", "data": { "token": "...", "user": { ... }, "token_expiry": 1700000000 } }
/// ```
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<Envelope<LoginResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("missing required fields".to_string()));
    }

    let user = UsersService::new(state.db.clone())
        .find_by_email(&payload.email)
        .await?;

    // Same message for unknown email and wrong password
    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash).await? => u,
        _ => {
            warn!(
                email = %safe_email_log(&payload.email),
                "Login rejected: invalid credentials"
            );
            return Err(ApiError::Unauthorized("invalid credentials".to_string()));
        }
    };

    let (token, token_expiry) = issue_token(&user, &state.jwt_secret, state.token_ttl)?;

    info!(
        user_id = user.id,
        email = %safe_email_log(&user.email),
        token = %safe_token_log(&token),
        token_expiry = token_expiry,
        "User login successful"
    );

    Ok(success(LoginResponse {
        token,
        user: user.into(),
        token_expiry,
    }))
}
