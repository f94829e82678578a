// src/users/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{CreateUserRequest, UserResponse, UsersResponse};
use super::services::UsersService;
use crate::auth::AuthedUser;
use crate::common::{success, ApiError, ApiJson, ApiPath, AppState, Envelope};

/// POST /api/v1/users - Register a new user (public)
pub async fn register_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = UsersService::new(state.db.clone())
        .create_user(payload, state.bcrypt_cost)
        .await?;

    Ok(success(UserResponse { user: user.into() }))
}

/// GET /api/v1/users/me - Profile of the authenticated user
pub async fn get_me(user: AuthedUser) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    Ok(success(UserResponse { user: user.profile }))
}

/// GET /api/v1/users/:id - Any authenticated user may look up a profile
pub async fn get_user_by_id(
    _user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let found = UsersService::new(state.db.clone()).get_by_id(user_id).await?;

    Ok(success(UserResponse { user: found.into() }))
}

/// GET /api/v1/users/all - Full user directory (employers only)
pub async fn get_all_users(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Envelope<UsersResponse>>, ApiError> {
    user.require_employer("only employers can view all users")?;
    let state = state_lock.read().await.clone();

    let users = UsersService::new(state.db.clone()).get_all().await?;
    debug!(requested_by = user.id, user_count = users.len(), "Loaded user directory");

    Ok(success(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}
