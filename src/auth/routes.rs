//! Authentication routes

use axum::{routing::post, Router};

use super::handlers;

/// Creates and returns the authentication router (mounted under `/api/v1`)
///
/// # Routes
/// - `POST /login` - Email/password login, returns a JWT
pub fn auth_routes() -> Router {
    Router::new().route("/login", post(handlers::login))
}
