//! Task routes

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

/// Creates the tasks router (mounted under `/api/v1`)
///
/// # Routes
/// - `GET /tasks`, `POST /tasks` - Employer task list / create
/// - `GET /tasks/assigned` - Employee task list
/// - `PATCH /tasks/:id/status` - Status change
/// - `PATCH /tasks/:id/assign` - Assignment (employers only)
/// - `GET /employee-summary` - Per-employee statistics (employers only)
pub fn tasks_routes() -> Router {
    Router::new()
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/tasks/assigned", get(handlers::list_assigned_tasks))
        .route("/tasks/:id/status", patch(handlers::update_task_status))
        .route("/tasks/:id/assign", patch(handlers::assign_task))
        .route("/employee-summary", get(handlers::employee_summary))
}
