// src/tasks/handlers.rs

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{
    AssignTaskRequest, CreateTaskRequest, EmployeeSummaryResponse, TaskListQuery,
    TaskListResponse, TaskResponse, UpdateTaskStatusRequest,
};
use super::services::TasksService;
use crate::auth::AuthedUser;
use crate::common::{success, ApiError, ApiJson, ApiPath, ApiQuery, AppState, Envelope};

async fn service(state_lock: &Arc<RwLock<AppState>>) -> TasksService {
    TasksService::new(state_lock.read().await.db.clone())
}

/// POST /api/v1/tasks - Create a task (employers only)
pub async fn create_task(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiJson(payload): ApiJson<CreateTaskRequest>,
) -> Result<Json<Envelope<TaskResponse>>, ApiError> {
    let task = service(&state_lock).await.create_task(&user, payload).await?;
    Ok(success(TaskResponse { task }))
}

/// GET /api/v1/tasks - The employer's tasks, filtered and sorted
pub async fn list_tasks(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiQuery(query): ApiQuery<TaskListQuery>,
) -> Result<Json<Envelope<TaskListResponse>>, ApiError> {
    let response = service(&state_lock).await.list_for_employer(&user, query).await?;
    Ok(success(response))
}

/// GET /api/v1/tasks/assigned - Tasks assigned to the calling employee
pub async fn list_assigned_tasks(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiQuery(query): ApiQuery<TaskListQuery>,
) -> Result<Json<Envelope<TaskListResponse>>, ApiError> {
    let response = service(&state_lock).await.list_assigned(&user, query).await?;
    Ok(success(response))
}

/// PATCH /api/v1/tasks/:id/status
pub async fn update_task_status(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateTaskStatusRequest>,
) -> Result<Json<Envelope<TaskResponse>>, ApiError> {
    let task = service(&state_lock)
        .await
        .update_status(&user, task_id, payload)
        .await?;
    Ok(success(TaskResponse { task }))
}

/// PATCH /api/v1/tasks/:id/assign (employers only)
pub async fn assign_task(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    ApiPath(task_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AssignTaskRequest>,
) -> Result<Json<Envelope<TaskResponse>>, ApiError> {
    let task = service(&state_lock)
        .await
        .assign_task(&user, task_id, payload)
        .await?;
    Ok(success(TaskResponse { task }))
}

/// GET /api/v1/employee-summary (employers only)
pub async fn employee_summary(
    user: AuthedUser,
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Envelope<EmployeeSummaryResponse>>, ApiError> {
    let employees = service(&state_lock).await.employee_summary(&user).await?;
    Ok(success(EmployeeSummaryResponse { employees }))
}
