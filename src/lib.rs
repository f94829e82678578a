//! Task Board REST backend.
//!
//! Serves the `/api/v1` surface consumed by `taskcli`: user registration and
//! login, task creation/assignment/status updates, filtered task lists and the
//! per-employee task summary.

use axum::{extract::Extension, middleware, routing::get, Json, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod common;
pub mod logging_middleware;
pub mod tasks;
pub mod users;

pub use common::{AppConfig, AppState};

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "success",
        "message": "API is running",
    }))
}

/// Composes every domain router under `/api/v1` and applies the shared layers.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let shared = Arc::new(RwLock::new(state));

    let api = Router::new()
        .merge(auth::auth_routes())
        .merge(users::users_routes())
        .merge(tasks::tasks_routes());

    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .fallback(common::extract::not_found)
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
