//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::token::decode_user_id;
use crate::common::{safe_email_log, ApiError, AppState};
use crate::users::{UserProfile, UserRole, UsersService};

/// Authenticated user extractor
///
/// Validates the bearer JWT and reloads the user from the database so role
/// changes and deletions take effect without waiting for token expiry.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub profile: UserProfile,
}

impl AuthedUser {
    pub fn is_employer(&self) -> bool {
        self.role == UserRole::Employer
    }

    pub fn is_employee(&self) -> bool {
        self.role == UserRole::Employee
    }

    /// Rejects non-employers with `message`.
    pub fn require_employer(&self, message: &str) -> Result<(), ApiError> {
        if self.is_employer() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(message.to_string()))
        }
    }

    /// Rejects non-employees with `message`.
    pub fn require_employee(&self, message: &str) -> Result<(), ApiError> {
        if self.is_employee() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(message.to_string()))
        }
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        let header = match parts.headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok()) {
            Some(h) => h,
            None => {
                warn!(path = %parts.uri.path(), "Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("authorization header required".into()));
            }
        };

        let token = bearer_token(header).ok_or_else(|| {
            warn!(path = %parts.uri.path(), "Authentication failed: malformed Authorization header");
            ApiError::Unauthorized("invalid authorization header format".into())
        })?;

        let user_id = decode_user_id(token, &app_state.jwt_secret)?;

        let user = UsersService::new(app_state.db.clone())
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Authentication failed: user not found in database");
                ApiError::Unauthorized("user not found".into())
            })?;

        let role = user
            .role
            .parse::<UserRole>()
            .map_err(ApiError::InternalServer)?;

        debug!(
            user_id = user.id,
            email = %safe_email_log(&user.email),
            role = %role,
            "User authentication successful via extractor"
        );

        Ok(AuthedUser {
            id: user.id,
            email: user.email.clone(),
            role,
            profile: user.into(),
        })
    }
}
