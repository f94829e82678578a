//! User routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates the users router (mounted under `/api/v1`)
///
/// # Routes
/// - `POST /users` - Register (public)
/// - `GET /users/me` - Current user
/// - `GET /users/all` - All users (employers only)
/// - `GET /users/:id` - User by id
pub fn users_routes() -> Router {
    Router::new()
        .route("/users", post(handlers::register_user))
        .route("/users/me", get(handlers::get_me))
        .route("/users/all", get(handlers::get_all_users))
        .route("/users/:id", get(handlers::get_user_by_id))
}
